use crate::task::{Status, Task, TaskId};

const LAUNCH_CAREER: &str = "Launch Career";
const ROADMAP: &str = "Roadmap";

const INITIAL: &[(u64, &str, &str, Status, &str)] = &[
    (1, "Launch Epic Career 🚀", "Create a killer Resume", Status::Todo, LAUNCH_CAREER),
    (
        2,
        "Master JavaScript 💛",
        "Get comfortable with the fundamentals",
        Status::Doing,
        LAUNCH_CAREER,
    ),
    (3, "Keep on Going 🏆", "You're almost there", Status::Doing, LAUNCH_CAREER),
    (4, "Conquer React ⚛️", "Get up and running with a popular library.", Status::Todo, ROADMAP),
    (5, "Understand Databases 📅", "Begin your backend journey", Status::Todo, ROADMAP),
    (6, "Crush Frameworks 🔨", "Create a plan to study hard", Status::Todo, ROADMAP),
    (
        7,
        "Explore ES6 Features 🚀",
        "Learn modern JavaScript syntax and features",
        Status::Doing,
        ROADMAP,
    ),
    (
        8,
        "Build a React Component 🧱",
        "Start with a simple component and gradually add complexity",
        Status::Done,
        ROADMAP,
    ),
    (
        9,
        "Redux State Management 🔄",
        "Understand and implement Redux for state management in React apps",
        Status::Doing,
        ROADMAP,
    ),
    (
        10,
        "Deploy React App 🚀",
        "Learn to deploy React applications using platforms like Netlify or Vercel",
        Status::Done,
        ROADMAP,
    ),
    (
        11,
        "Learn Data Structures and Algorithms 📚",
        "Study fundamental data structures and algorithms to solve coding problems efficiently",
        Status::Todo,
        LAUNCH_CAREER,
    ),
    (
        12,
        "Contribute to Open Source Projects 🌐",
        "Gain practical experience and collaborate with others in the software development community",
        Status::Doing,
        LAUNCH_CAREER,
    ),
    (
        13,
        "Build Portfolio Projects 🛠️",
        "Create a portfolio showcasing your skills and projects to potential employers",
        Status::Doing,
        LAUNCH_CAREER,
    ),
];

/// Default dataset written on first run.
pub fn initial_tasks() -> Vec<Task> {
    INITIAL
        .iter()
        .map(|&(id, title, description, status, board)| Task {
            id: TaskId::new(id),
            title: title.to_string(),
            description: description.to_string(),
            status,
            board: board.to_string(),
        })
        .collect()
}
