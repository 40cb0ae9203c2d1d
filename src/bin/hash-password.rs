//! Prints a bcrypt hash for ADMIN_HASH_PASSWORD.

use bcrypt::{hash, verify, DEFAULT_COST};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "hash-password", about = "Hash the admin password for the .env file")]
struct Args {
    /// Password to hash
    password: String,

    /// bcrypt cost factor
    #[arg(long, default_value_t = DEFAULT_COST)]
    cost: u32,
}

fn main() {
    let args = Args::parse();

    if args.password.len() < 8 {
        eprintln!("Warning: passwords shorter than 8 characters are easy to guess.");
    }

    let hashed = match hash(&args.password, args.cost) {
        Ok(hashed) => hashed,
        Err(e) => {
            eprintln!("Error hashing password: {}", e);
            std::process::exit(1);
        }
    };

    if !verify(&args.password, &hashed).unwrap_or(false) {
        eprintln!("Generated hash failed verification");
        std::process::exit(1);
    }

    println!("\nCost     : {}", args.cost);
    println!("Hash     : {}\n", hashed);
    println!("# Paste this into your .env:");
    println!("ADMIN_HASH_PASSWORD={}", hashed);
}
