//! Built-in sample content served when the store has nothing to offer.

use chrono::NaiveDate;

use super::model::{
    About, BlogPost, Education, Experience, Profile, Project, Service, Skill, SkillCategory,
    SocialLink, Testimonial,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn project(
    id: &str,
    title: &str,
    description: &str,
    image: &str,
    tags: &[&str],
    category: &str,
    github: Option<&str>,
    demo: Option<&str>,
    featured: bool,
    when: NaiveDate,
    stack: &[&str],
) -> Project {
    Project {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        content: None,
        image_url: image.to_string(),
        tags: strings(tags),
        category: category.to_string(),
        github_url: github.map(str::to_string),
        demo_url: demo.map(str::to_string),
        featured,
        date: when,
        tech_stack: strings(stack),
    }
}

pub fn projects() -> Vec<Project> {
    vec![
        project(
            "1",
            "E-commerce Platform",
            "A full-featured e-commerce platform with user authentication, product management, cart functionality, and payment processing.",
            "/images/projects/ecommerce.svg",
            &["Next.js", "React", "Node.js", "MongoDB", "Stripe"],
            "Full Stack",
            Some("https://github.com/username/ecommerce-platform"),
            Some("https://ecommerce-demo.com"),
            true,
            date(2024, 12, 15),
            &["Next.js", "React", "Node.js", "Express", "MongoDB", "Stripe API", "Redux", "Tailwind CSS"],
        ),
        project(
            "2",
            "Real Estate Mobile App",
            "A cross-platform mobile application for real estate listings, featuring property search, filtering, and appointment scheduling.",
            "/images/projects/realestate.svg",
            &["React Native", "Firebase", "Google Maps API", "Expo"],
            "Mobile App",
            Some("https://github.com/username/real-estate-app"),
            Some("https://real-estate-app-demo.com"),
            true,
            date(2024, 10, 20),
            &["React Native", "Expo", "Firebase", "Google Maps API", "Redux", "Node.js"],
        ),
        project(
            "3",
            "Corporate WordPress Website",
            "A custom WordPress website for a corporate client with custom theme development, plugins integration, and performance optimization.",
            "/images/projects/wordpress.svg",
            &["WordPress", "PHP", "JavaScript", "SCSS"],
            "WordPress",
            None,
            Some("https://corporate-website-demo.com"),
            false,
            date(2024, 8, 5),
            &["WordPress", "PHP", "JavaScript", "SCSS", "MySQL", "ACF Pro", "WooCommerce"],
        ),
        project(
            "4",
            "Task Management Dashboard",
            "A comprehensive task management system with team collaboration, file sharing, and project analytics.",
            "/images/projects/taskmanager.svg",
            &["React", "Firebase", "Material UI", "Chart.js"],
            "Full Stack",
            Some("https://github.com/username/task-manager"),
            Some("https://task-manager-demo.com"),
            false,
            date(2024, 6, 18),
            &["React", "Firebase", "Material UI", "Chart.js", "Node.js", "Express"],
        ),
        project(
            "5",
            "Fitness Tracking App",
            "Mobile application for tracking workouts, nutrition, and fitness goals with personalized recommendations.",
            "/images/projects/fitnessapp.svg",
            &["Flutter", "Firebase", "Dart", "Provider"],
            "Mobile App",
            Some("https://github.com/username/fitness-app"),
            Some("https://fitness-app-demo.com"),
            false,
            date(2024, 4, 10),
            &["Flutter", "Dart", "Firebase", "Provider State Management", "RESTful APIs"],
        ),
        project(
            "6",
            "WordPress Plugin for E-learning",
            "Custom WordPress plugin for creating and managing online courses with payment integration and user management.",
            "/images/projects/wordpressplugin.svg",
            &["WordPress", "PHP", "JavaScript", "WooCommerce"],
            "WordPress",
            Some("https://github.com/username/wp-elearning-plugin"),
            Some("https://wordpress-plugin-demo.com"),
            false,
            date(2024, 2, 22),
            &["WordPress", "PHP", "JavaScript", "MySQL", "WooCommerce", "REST API"],
        ),
    ]
}

pub fn services() -> Vec<Service> {
    vec![
        Service {
            id: "1".to_string(),
            title: "Custom WordPress Solutions".to_string(),
            description: "Bespoke WordPress development that goes far beyond standard templates."
                .to_string(),
            icon: "wordpress".to_string(),
            features: strings(&[
                "Custom Theme Development - Unique, responsive designs tailored to brand identity",
                "Advanced Plugin Development - Custom functionality and third-party integrations",
                "WordPress Optimization - Performance tuning, security hardening, and SEO optimization",
                "E-commerce Solutions - WooCommerce stores optimized for conversions",
                "Multisite Development - Complex WordPress network solutions",
                "Migration & Maintenance - Seamless transitions and ongoing support",
            ]),
        },
        Service {
            id: "2".to_string(),
            title: "Full Stack Development".to_string(),
            description: "Complete web application development using modern technologies and industry best practices.".to_string(),
            icon: "code".to_string(),
            features: strings(&[
                "Frontend Technologies - React, Vue.js, JavaScript (ES6+), HTML5, CSS3",
                "Backend Development - Node.js, PHP, Python, RESTful APIs",
                "Database Management - MySQL, PostgreSQL, MongoDB",
                "Cloud Integration - AWS, Google Cloud, deployment and hosting",
                "Mobile Development - React Native, Progressive Web Apps",
                "AI Integration - Machine learning and automation solutions",
            ]),
        },
        Service {
            id: "3".to_string(),
            title: "Technical Consulting".to_string(),
            description: "Expert guidance and strategic consulting for your technical projects."
                .to_string(),
            icon: "briefcase".to_string(),
            features: strings(&[
                "WordPress architecture and strategy consulting",
                "Code review and optimization",
                "Technical project management",
                "Developer mentoring and training",
                "Performance audits and recommendations",
                "Technology stack selection and implementation",
            ]),
        },
    ]
}

pub fn testimonials() -> Vec<Testimonial> {
    let t = |id: &str, name: &str, role: &str, company: &str, content: &str, avatar: &str, rating: u8, when: NaiveDate| Testimonial {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        company: company.to_string(),
        content: content.to_string(),
        avatar_url: Some(avatar.to_string()),
        rating,
        date: when,
    };

    vec![
        t(
            "1",
            "John Smith",
            "CEO",
            "TechCorp Inc.",
            "Working with this developer was a game-changer for our company. The web application they built exceeded our expectations in terms of functionality and design. Highly recommended!",
            "/images/testimonials/john.jpg",
            5,
            date(2024, 11, 15),
        ),
        t(
            "2",
            "Sarah Johnson",
            "Marketing Director",
            "Growth Marketing",
            "The mobile app developed for our company has significantly improved our customer engagement. The attention to detail and user experience design was exceptional.",
            "/images/testimonials/sarah.jpg",
            5,
            date(2024, 9, 22),
        ),
        t(
            "3",
            "David Chen",
            "Founder",
            "StartupXYZ",
            "Our WordPress website has never performed better. The custom theme and optimizations have resulted in faster load times and better SEO rankings. Excellent work!",
            "/images/testimonials/david.jpg",
            4,
            date(2024, 8, 10),
        ),
    ]
}

pub fn blog_posts() -> Vec<BlogPost> {
    let post = |id: &str, title: &str, excerpt: &str, content: &str, cover: &str, when: NaiveDate, tags: &[&str], slug: &str| BlogPost {
        id: id.to_string(),
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        content: content.to_string(),
        cover_image: cover.to_string(),
        date: when,
        author: "Jane Developer".to_string(),
        tags: strings(tags),
        slug: slug.to_string(),
    };

    vec![
        post(
            "1",
            "The Future of Web Development in 2025",
            "Exploring upcoming trends in web development including AI integration, immersive experiences, and performance optimization.",
            "# The Future of Web Development in 2025\n\n\
             Web development continues to evolve at a rapid pace.\n\n\
             ## AI Integration\n\n\
             - Personalized user experiences\n- Intelligent content generation\n- Predictive analytics\n\n\
             ## Immersive Experiences\n\n\
             - WebGL and Three.js for 3D graphics\n- WebXR for virtual and augmented reality\n\n\
             ## Performance Optimization\n\n\
             - Code splitting and lazy loading\n- Edge computing and CDN optimization\n- WebAssembly for high-performance code\n",
            "/images/blog/webdev2025.svg",
            date(2024, 12, 1),
            &["Web Development", "Trends", "AI", "Performance"],
            "future-web-development-2025",
        ),
        post(
            "2",
            "Building Cross-Platform Mobile Apps: A Comprehensive Guide",
            "Learn about the best approaches for building mobile applications that work seamlessly across iOS and Android platforms.",
            "# Building Cross-Platform Mobile Apps: A Comprehensive Guide\n\n\
             ## React Native Development\n\n\
             - JavaScript/TypeScript development\n- Native performance\n\n\
             ## Flutter Development\n\n\
             - Single codebase in Dart\n- Custom widget system\n\n\
             ## Conclusion\n\n\
             Choose the right framework based on your project needs and team expertise.\n",
            "/images/blog/crossplatform.svg",
            date(2024, 10, 15),
            &["Mobile Development", "React Native", "Flutter", "Cross-Platform"],
            "cross-platform-mobile-apps-guide",
        ),
        post(
            "3",
            "WordPress Performance Optimization Techniques",
            "Discover practical tips and strategies to improve the performance and loading speed of your WordPress websites.",
            "# WordPress Performance Optimization Techniques\n\n\
             ## Caching Implementation\n\n\
             - Page caching\n- Object caching\n- CDN integration\n\n\
             ## Database Optimization\n\n\
             - Regular cleanup of post revisions\n- Optimize database tables\n\n\
             ## Asset Optimization\n\n\
             - Image compression\n- CSS/JS minification\n- Lazy loading\n",
            "/images/blog/wordpress-performance.svg",
            date(2024, 9, 5),
            &["WordPress", "Performance", "Optimization", "Speed"],
            "wordpress-performance-optimization",
        ),
    ]
}

pub fn profile() -> Profile {
    let skill = |name: &str, level: u8, icon: &str, category: SkillCategory| Skill {
        name: name.to_string(),
        level,
        icon: Some(icon.to_string()),
        category,
    };

    Profile {
        about: About {
            name: "Daniel Bankole Oriyomi".to_string(),
            title: "WordPress Expert & Full Stack Developer".to_string(),
            bio: "Passionate WordPress expert and full-stack developer who transforms complex ideas into powerful digital solutions.".to_string(),
            location: "Lagos, Nigeria".to_string(),
            email: "info@solvatree.com".to_string(),
            availability: "Open for freelance projects and collaborations".to_string(),
            profile_image: "/images/profile/daniel-bankole-oriyomi.jpg".to_string(),
            intro: "Hello! I'm Daniel, a dedicated WordPress expert and full-stack developer with a passion for creating exceptional digital experiences.".to_string(),
        },
        skills: vec![
            skill("React", 95, "react", SkillCategory::Frontend),
            skill("Next.js", 90, "nextjs", SkillCategory::Frontend),
            skill("TypeScript", 85, "typescript", SkillCategory::Frontend),
            skill("Tailwind CSS", 90, "tailwind", SkillCategory::Frontend),
            skill("Node.js", 90, "nodejs", SkillCategory::Backend),
            skill("PostgreSQL", 75, "postgresql", SkillCategory::Backend),
            skill("Firebase", 85, "firebase", SkillCategory::Backend),
            skill("React Native", 85, "reactnative", SkillCategory::Mobile),
            skill("Flutter", 75, "flutter", SkillCategory::Mobile),
            skill("WordPress", 90, "wordpress", SkillCategory::Other),
            skill("PHP", 80, "php", SkillCategory::Other),
            skill("Docker", 75, "docker", SkillCategory::Other),
        ],
        experience: vec![
            Experience {
                id: "1".to_string(),
                title: "Senior Full Stack Developer".to_string(),
                company: "Tech Innovations Inc.".to_string(),
                location: "San Francisco, CA (Remote)".to_string(),
                start_date: date(2023, 5, 1),
                end_date: None,
                current: true,
                description: strings(&[
                    "Lead developer for client projects in fintech and e-commerce sectors",
                    "Implemented CI/CD pipelines resulting in 40% faster deployment times",
                ]),
                skills: strings(&["React", "Node.js", "MongoDB", "Docker", "AWS", "TypeScript"]),
            },
            Experience {
                id: "2".to_string(),
                title: "WordPress Developer".to_string(),
                company: "Digital Agency XYZ".to_string(),
                location: "Chicago, IL (Remote)".to_string(),
                start_date: date(2019, 3, 1),
                end_date: Some(date(2021, 8, 10)),
                current: false,
                description: strings(&[
                    "Developed custom WordPress themes and plugins for enterprise clients",
                    "Maintained and updated 15+ client websites",
                ]),
                skills: strings(&["WordPress", "PHP", "JavaScript", "MySQL", "WooCommerce"]),
            },
        ],
        education: vec![Education {
            id: "1".to_string(),
            degree: "Bachelor of Science".to_string(),
            field: "Computer Engineering".to_string(),
            institution: "University of Michigan".to_string(),
            location: "Ann Arbor, MI".to_string(),
            start_date: date(2013, 9, 1),
            end_date: Some(date(2017, 5, 30)),
            current: false,
            description: Some("Graduated with Honors, Minor in Mathematics".to_string()),
        }],
        social_links: vec![
            SocialLink {
                id: "1".to_string(),
                name: "GitHub".to_string(),
                url: "https://github.com/username".to_string(),
                icon: "github".to_string(),
            },
            SocialLink {
                id: "2".to_string(),
                name: "LinkedIn".to_string(),
                url: "https://linkedin.com/in/username".to_string(),
                icon: "linkedin".to_string(),
            },
            SocialLink {
                id: "3".to_string(),
                name: "Upwork".to_string(),
                url: "https://www.upwork.com/freelancers/username".to_string(),
                icon: "upwork".to_string(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Document;

    #[test]
    fn test_sample_records_are_valid() {
        assert!(projects().iter().all(|p| p.validate().is_ok()));
        assert!(blog_posts().iter().all(|p| p.validate().is_ok()));
        assert!(services().iter().all(|s| s.validate().is_ok()));
        assert!(testimonials().iter().all(|t| t.validate().is_ok()));
    }

    #[test]
    fn test_sample_sizes() {
        assert_eq!(projects().len(), 6);
        assert_eq!(blog_posts().len(), 3);
        assert_eq!(services().len(), 3);
        assert_eq!(testimonials().len(), 3);
    }
}
