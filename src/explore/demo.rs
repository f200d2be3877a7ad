//! Built-in demo students, used when no student file is configured.

use crate::profile::StudentProfile;

const AVATAR_BASE: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=";

struct Seed {
    id: &'static str,
    name: &'static str,
    course: &'static str,
    year: u8,
    bio: &'static str,
    avatar: &'static str,
    skills_teach: &'static [&'static str],
    skills_learn: &'static [&'static str],
    subjects: &'static [&'static str],
    learning_style: &'static [&'static str],
    interaction_mode: &'static [&'static str],
    availability: &'static [&'static str],
}

impl Seed {
    fn build(&self) -> StudentProfile {
        let owned =
            |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        StudentProfile {
            id: self.id.to_string(),
            name: self.name.to_string(),
            course: self.course.to_string(),
            year: self.year,
            bio: self.bio.to_string(),
            photo: format!("{AVATAR_BASE}{}", self.avatar),
            skills_teach: owned(self.skills_teach),
            skills_learn: owned(self.skills_learn),
            subjects: owned(self.subjects),
            learning_style: owned(self.learning_style),
            interaction_mode: owned(self.interaction_mode),
            availability: owned(self.availability),
        }
    }
}

const STUDENTS: &[Seed] = &[
    Seed {
        id: "1",
        name: "Sarah Chen",
        course: "Computer Science",
        year: 3,
        bio: "Passionate about AI and machine learning. Love helping others understand complex programming concepts!",
        avatar: "Sarah",
        skills_teach: &["Python", "React", "Data Structures"],
        skills_learn: &["UI/UX Design", "Cloud Computing"],
        subjects: &["Algorithms", "Machine Learning", "Web Development"],
        learning_style: &["Visual", "Hands-on"],
        interaction_mode: &["Online", "Offline"],
        availability: &["Weekday Evenings", "Weekends"],
    },
    Seed {
        id: "2",
        name: "Marcus Johnson",
        course: "Business Administration",
        year: 2,
        bio: "Entrepreneurship enthusiast with a knack for marketing strategies. Always up for collaborative projects!",
        avatar: "Marcus",
        skills_teach: &["Marketing", "Public Speaking", "Excel"],
        skills_learn: &["Web Development", "Graphic Design"],
        subjects: &["Business Strategy", "Digital Marketing", "Finance"],
        learning_style: &["Auditory", "Reading/Writing"],
        interaction_mode: &["Online"],
        availability: &["Weekday Mornings", "Weekday Afternoons"],
    },
    Seed {
        id: "3",
        name: "Priya Patel",
        course: "Graphic Design",
        year: 4,
        bio: "Creative designer specializing in branding and illustration. Love teaching design thinking!",
        avatar: "Priya",
        skills_teach: &["Adobe Illustrator", "UI/UX Design", "Branding"],
        skills_learn: &["3D Modeling", "Animation"],
        subjects: &["Visual Communication", "Typography", "Color Theory"],
        learning_style: &["Visual", "Hands-on"],
        interaction_mode: &["Offline"],
        availability: &["Weekday Evenings", "Weekends"],
    },
    Seed {
        id: "4",
        name: "Alex Rivera",
        course: "Mathematics",
        year: 3,
        bio: "Math tutor with 2 years of experience. I make calculus fun and statistics simple!",
        avatar: "Alex",
        skills_teach: &["Calculus", "Statistics", "Linear Algebra"],
        skills_learn: &["Programming", "Data Visualization"],
        subjects: &["Advanced Calculus", "Probability Theory", "Mathematical Modeling"],
        learning_style: &["Visual", "Reading/Writing"],
        interaction_mode: &["Online", "Offline"],
        availability: &["Weekday Afternoons", "Weekends"],
    },
    Seed {
        id: "5",
        name: "Emma Williams",
        course: "Psychology",
        year: 2,
        bio: "Interested in cognitive psychology and research methods. Great at explaining concepts clearly!",
        avatar: "Emma",
        skills_teach: &["Research Methods", "Essay Writing", "SPSS"],
        skills_learn: &["Public Speaking", "Data Analysis"],
        subjects: &["Cognitive Psychology", "Research Design", "Social Psychology"],
        learning_style: &["Reading/Writing", "Auditory"],
        interaction_mode: &["Online"],
        availability: &["Weekday Evenings", "Weekday Mornings"],
    },
    Seed {
        id: "6",
        name: "David Kim",
        course: "Mechanical Engineering",
        year: 4,
        bio: "Engineering senior with experience in CAD and robotics. Love building things and solving problems!",
        avatar: "David",
        skills_teach: &["CAD", "Physics", "Problem Solving"],
        skills_learn: &["Electronics", "Programming"],
        subjects: &["Thermodynamics", "Fluid Mechanics", "Robotics"],
        learning_style: &["Hands-on", "Visual"],
        interaction_mode: &["Offline"],
        availability: &["Weekends"],
    },
    Seed {
        id: "7",
        name: "Zoe Martinez",
        course: "English Literature",
        year: 3,
        bio: "Avid reader and writer. I can help with essays, creative writing, and literary analysis!",
        avatar: "Zoe",
        skills_teach: &["Essay Writing", "Literary Analysis", "Creative Writing"],
        skills_learn: &["Public Speaking", "Video Editing"],
        subjects: &["19th Century Literature", "Contemporary Fiction", "Poetry"],
        learning_style: &["Reading/Writing", "Auditory"],
        interaction_mode: &["Online", "Offline"],
        availability: &["Weekday Afternoons", "Weekends"],
    },
    Seed {
        id: "8",
        name: "James Thompson",
        course: "Economics",
        year: 2,
        bio: "Economics student passionate about policy and data analysis. Happy to study together!",
        avatar: "James",
        skills_teach: &["Economics", "Data Analysis", "Excel"],
        skills_learn: &["Python", "Web Development"],
        subjects: &["Microeconomics", "Macroeconomics", "Econometrics"],
        learning_style: &["Visual", "Reading/Writing"],
        interaction_mode: &["Online"],
        availability: &["Weekday Mornings", "Weekday Evenings"],
    },
];

const CURRENT_USER: Seed = Seed {
    id: "current",
    name: "You",
    course: "Computer Science",
    year: 2,
    bio: "Passionate learner always looking to grow and help others!",
    avatar: "CurrentUser",
    skills_teach: &["JavaScript", "HTML/CSS"],
    skills_learn: &["Backend Development", "DevOps"],
    subjects: &["Web Development", "Databases", "Software Engineering"],
    learning_style: &["Visual", "Hands-on"],
    interaction_mode: &["Online"],
    availability: &["Weekday Evenings", "Weekends"],
};

pub fn demo_students() -> Vec<StudentProfile> {
    STUDENTS.iter().map(Seed::build).collect()
}

/// Profile shown on "My Profile" until the user edits it.
pub fn demo_current_user() -> StudentProfile {
    CURRENT_USER.build()
}
