//! Built-in profile: the facts published on the portfolio site.

use super::{
    CertificationEntry, EducationEntry, ExperienceEntry, Identity, KnowledgeBase, ProjectEntry,
    SkillCategory, SkillGroup, SocialLink,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn link(label: &str, url: &str) -> SocialLink {
    SocialLink {
        label: label.to_string(),
        url: url.to_string(),
    }
}

fn skills(category: SkillCategory, items: &[&str]) -> SkillGroup {
    SkillGroup {
        category,
        items: strings(items),
    }
}

pub(super) fn builtin_profile() -> KnowledgeBase {
    KnowledgeBase {
        identity: Identity {
            name: "Raghava Kami Reddy Vasa".to_string(),
            short_name: "Raghava".to_string(),
            headline: "Python Developer building secure backend services for financial and retail platforms".to_string(),
            location: "Skillman, New Jersey".to_string(),
            email: "vrkreddy27@gmail.com".to_string(),
            phone: "+1-609-309-1732".to_string(),
            social: vec![
                link("GitHub", "https://github.com/RaghavaKamu"),
                link("LinkedIn", "https://www.linkedin.com/in/raghava-reddy-432481279/"),
                link("Twitter", "https://x.com/RaghavaReddy27"),
            ],
            summary: "Passionate about software development, machine learning, and web technologies".to_string(),
        },
        education: vec![
            EducationEntry {
                degree: "Master's in Computer Science".to_string(),
                institution: "New Jersey Institute of Technology".to_string(),
                period: "expected April 2025".to_string(),
                location: "Newark, NJ".to_string(),
                description: "Graduate coursework in software engineering and machine learning.".to_string(),
            },
            EducationEntry {
                degree: "Bachelor's in Computer Science".to_string(),
                institution: "Vellore Institute of Technology".to_string(),
                period: "2019-2023".to_string(),
                location: "Vellore, India".to_string(),
                description: "Undergraduate studies in computer science.".to_string(),
            },
        ],
        experience: vec![
            ExperienceEntry {
                title: "Python Developer".to_string(),
                company: "JPMorgan Chase - NA, USA".to_string(),
                period: "Present".to_string(),
                location: "USA".to_string(),
                description: "Building and deploying secure backend microservices using Python and Django REST Framework to process high-volume financial transactions with low latency, with Apache Kafka-based streaming, optimized PostgreSQL data models, and RESTful APIs integrated with SWIFT / ISO 20022 standards for interbank fund transfers.".to_string(),
                technologies: strings(&[
                    "Python",
                    "Django REST Framework",
                    "PostgreSQL",
                    "Apache Kafka",
                    "REST APIs",
                    "SWIFT / ISO 20022",
                    "Airflow",
                    "Tableau",
                    "AWS",
                ]),
                current: true,
            },
            ExperienceEntry {
                title: "Python Developer".to_string(),
                company: "HCL Tech - India".to_string(),
                period: "Previous".to_string(),
                location: "India".to_string(),
                description: "Developed retail and e-commerce platforms using Python and FastAPI, maintained MySQL and Cassandra databases for real-time product updates, and built microservices integrated with third-party payment gateways, streamlining inventory updates with Apache Kafka and order workflows with Prefect.".to_string(),
                technologies: strings(&[
                    "Python",
                    "FastAPI",
                    "Flask",
                    "MySQL",
                    "Cassandra",
                    "Apache Kafka",
                    "Prefect",
                    "GraphQL (Ariadne)",
                    "Azure",
                    "Docker",
                    "Kubernetes",
                ]),
                current: false,
            },
            ExperienceEntry {
                title: "Machine Learning Intern".to_string(),
                company: "CORIZO".to_string(),
                period: "Internship".to_string(),
                location: "Remote".to_string(),
                description: "Researched deep learning techniques for pattern recognition and data analysis.".to_string(),
                technologies: strings(&["Python", "TensorFlow", "Deep Learning"]),
                current: false,
            },
            ExperienceEntry {
                title: "Technical Core Committee Member".to_string(),
                company: "IEEE NPS".to_string(),
                period: "Undergraduate".to_string(),
                location: "Vellore, India".to_string(),
                description: "Organized technical workshops and mentoring programs.".to_string(),
                technologies: Vec::new(),
                current: false,
            },
        ],
        projects: vec![
            ProjectEntry {
                title: "Drug Evaluation in Medicine Recommendation System".to_string(),
                description: "Built a machine learning model that predicts drug effectiveness for patients and a sentiment analysis system for user reviews on medicines.".to_string(),
                technologies: strings(&["Python", "Django", "MySQL", "Machine Learning", "Sentiment Analysis"]),
                category: "Machine Learning".to_string(),
                keywords: strings(&["drug", "medicine", "recommendation system"]),
            },
            ProjectEntry {
                title: "Dental Care Centre Website".to_string(),
                description: "Designed a responsive website that enables online doctor appointments, with backend services for secure user authentication.".to_string(),
                technologies: strings(&["HTML", "CSS", "Node.js", "MongoDB"]),
                category: "Web Development".to_string(),
                keywords: strings(&["dental", "doctor appointment", "appointment booking", "appointment system"]),
            },
            ProjectEntry {
                title: "Automated Irrigation System using IoT".to_string(),
                description: "Developed a smart irrigation system that analyzes soil and climate conditions and controls water supply based on environmental data.".to_string(),
                technologies: strings(&["Python", "Arduino", "IoT Sensors", "Machine Learning"]),
                category: "IoT".to_string(),
                keywords: strings(&["irrigation", "iot", "arduino"]),
            },
            ProjectEntry {
                title: "Portfolio Website".to_string(),
                description: "Created a responsive portfolio website with interactive UI elements, dynamic theme switching, and an AI-powered chatbot assistant.".to_string(),
                technologies: strings(&["React.js", "TypeScript", "Tailwind CSS", "Framer Motion", "OpenAI"]),
                category: "Web Development".to_string(),
                keywords: strings(&["this website", "this site", "portfolio website", "chatbot"]),
            },
            ProjectEntry {
                title: "Machine Learning Research Project".to_string(),
                description: "Researched and developed deep learning techniques for pattern recognition and data analysis as part of the machine learning internship.".to_string(),
                technologies: strings(&["Python", "TensorFlow", "Deep Learning", "Data Analysis"]),
                category: "Machine Learning".to_string(),
                keywords: strings(&["research", "pattern recognition"]),
            },
            ProjectEntry {
                title: "Technical Workshop Management System".to_string(),
                description: "Created a platform for managing IEEE technical workshops and mentoring programs, with registration, scheduling, and resource sharing.".to_string(),
                technologies: strings(&["JavaScript", "Node.js", "MongoDB", "Express"]),
                category: "Web Development".to_string(),
                keywords: strings(&["workshop", "mentoring"]),
            },
        ],
        skills: vec![
            skills(SkillCategory::Languages, &["Python", "GoLang", "JavaScript", "Ruby", "C"]),
            skills(
                SkillCategory::Web,
                &["Django REST Framework", "Flask / FastAPI", "GraphQL (Ariadne)", "React.js", "HTML / CSS", "Spring Boot"],
            ),
            skills(SkillCategory::Database, &["PostgreSQL", "MySQL", "Cassandra", "MongoDB", "Oracle"]),
            skills(
                SkillCategory::Ml,
                &["Scikit-learn", "TensorFlow / PyTorch", "Pandas / NumPy", "Fraud Detection & Risk Scoring", "Tableau / Power BI"],
            ),
            skills(SkillCategory::Cloud, &["AWS", "Azure", "Docker & Kubernetes", "CI/CD"]),
            skills(SkillCategory::Tools, &["Kafka", "Airflow / Prefect", "Git & GitHub"]),
        ],
        certifications: vec![
            CertificationEntry {
                name: "Full Stack Developer Certification".to_string(),
                issuer: "Microsoft".to_string(),
            },
            CertificationEntry {
                name: "Machine Learning Internship".to_string(),
                issuer: "Corizo".to_string(),
            },
        ],
        interests: strings(&["exploring hiking trails", "reading tech blogs", "experimenting with new recipes in the kitchen"]),
    }
}
