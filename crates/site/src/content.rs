//! Portfolio content tree shown on the desktop.

use serde_json::json;
use window_manager::{ContentEntry, ContentLibrary, DocumentFormat, EntryKind};

fn document(id: &str, name: &str, format: DocumentFormat, path: &str) -> ContentEntry {
    ContentEntry::new(id, name, EntryKind::Document { format }, path)
}

fn shortcut(id: &str, name: &str, target: &str, path: &str) -> ContentEntry {
    ContentEntry::new(
        id,
        name,
        EntryKind::Shortcut {
            target: target.to_string(),
        },
        path,
    )
}

fn project(id: &str, name: &str, summary: &str, stack: &[&str], repo: &str) -> ContentEntry {
    ContentEntry::new(
        id,
        name,
        EntryKind::Executable,
        format!("/Desktop/Projects/{name}"),
    )
    .with_metadata(json!({
        "summary": summary,
        "stack": stack,
        "repository": repo,
    }))
}

fn game(id: &str, name: &str, col: u64) -> ContentEntry {
    ContentEntry::new(id, name, EntryKind::Executable, format!("/Desktop/{name}"))
        .with_metadata(json!({ "gridPosition": { "col": col, "row": 1 } }))
        .decorative()
}

/// Desktop icons and everything reachable from them.
pub fn portfolio_library() -> ContentLibrary {
    ContentLibrary::new(vec![
        ContentEntry::new(
            "desktop-aboutme",
            "About Me",
            EntryKind::Folder,
            "/Desktop/About Me",
        )
        .with_children(vec![
            document(
                "interests-txt",
                "Interests.txt",
                DocumentFormat::Text,
                "/Desktop/About Me/Interests.txt",
            )
            .with_metadata(json!({
                "text": "Interests\n=========\n\n- Interface design\n- Photography\n- Hiking\n- Teaching and mentoring",
            })),
            document(
                "skills-json",
                "Skills.json",
                DocumentFormat::Json,
                "/Desktop/About Me/Skills.json",
            )
            .with_metadata(json!({
                "text": "{\n  \"languages\": [\"Rust\", \"TypeScript\", \"Python\"],\n  \"tools\": [\"Git\", \"Docker\"]\n}",
            })),
            document(
                "resume-pdf",
                "Resume.pdf",
                DocumentFormat::Pdf,
                "/resume/resume.pdf",
            ),
            document(
                "portrait-png",
                "Portrait.png",
                DocumentFormat::Image,
                "/images/portrait.png",
            ),
        ]),
        ContentEntry::new(
            "desktop-projects",
            "Projects",
            EntryKind::Folder,
            "/Desktop/Projects",
        )
        .with_children(vec![
            project(
                "project-on-track",
                "OnTrack.exe",
                "Habit tracker with streaks and reminders.",
                &["Rust", "Leptos", "SQLite"],
                "https://github.com/example/on-track",
            ),
            project(
                "project-behavioral-log",
                "BehaviorLog.exe",
                "Structured journaling for behavioural data.",
                &["TypeScript", "PostgreSQL"],
                "https://github.com/example/behavior-log",
            ),
            project(
                "project-portfolio",
                "Portfolio.exe",
                "This desktop shell.",
                &["Rust", "WebAssembly"],
                "https://github.com/example/portfolio",
            ),
        ]),
        ContentEntry::new(
            "desktop-experience",
            "Experience",
            EntryKind::Folder,
            "/Desktop/Experience",
        )
        .with_children(vec![
            document(
                "exp-readme",
                "README.md",
                DocumentFormat::Markdown,
                "/Desktop/Experience/README.md",
            )
            .with_metadata(json!({
                "text": "# Experience\n\nEach folder holds one role with a short write-up.",
            })),
            ContentEntry::new(
                "exp-studio",
                "Studio",
                EntryKind::Folder,
                "/Desktop/Experience/Studio",
            )
            .with_children(vec![document(
                "exp-studio-role",
                "Role.md",
                DocumentFormat::Markdown,
                "/Desktop/Experience/Studio/Role.md",
            )
            .with_metadata(json!({
                "text": "# Frontend Engineer\n\nDesign systems and interactive prototypes.",
            }))]),
        ]),
        ContentEntry::new(
            "desktop-contact",
            "Contact",
            EntryKind::Folder,
            "/Desktop/Contact",
        )
        .with_children(vec![
            shortcut(
                "contact-email",
                "Email",
                "mailto:hello@example.com",
                "/Desktop/Contact/Email",
            ),
            shortcut(
                "contact-github",
                "GitHub",
                "https://github.com/example",
                "/Desktop/Contact/GitHub",
            ),
        ]),
        shortcut("desktop-thispc", "This PC", "/", "/Desktop/This PC"),
        game("game-solitaire", "Solitaire", 11),
        game("game-minesweeper", "Minesweeper", 12),
    ])
}
