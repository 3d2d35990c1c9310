//! Sample dataset for local development.

use bcrypt::hash;
use uuid::Uuid;

use crate::db::enums::{ProjectStatus, TaskPriority, TaskStatus, UserRole};
use crate::db::models::{NewComment, NewLabel, NewProject, NewTask, NewUser};
use crate::db::store::Store;
use crate::error::AppResult;

struct SeedTask {
    title: &'static str,
    description: &'static str,
    status: TaskStatus,
    priority: TaskPriority,
    project: usize,
    assignee: Option<usize>,
}

const USERS: [(&str, &str, &str, UserRole); 4] = [
    ("admin@taskforge.com", "Admin User", "admin123", UserRole::Admin),
    ("alice@taskforge.com", "Alice Smith", "alice123", UserRole::Member),
    ("bob@taskforge.com", "Bob Johnson", "bob123", UserRole::Member),
    ("viewer@taskforge.com", "Viewer User", "viewer123", UserRole::Viewer),
];

// (name, description, status, owner index)
const PROJECTS: [(&str, &str, ProjectStatus, usize); 4] = [
    ("Website Redesign", "Redesign the company website with modern UI/UX", ProjectStatus::Active, 0),
    ("Mobile App", "Develop a mobile app for iOS and Android", ProjectStatus::Active, 0),
    ("Internal Tools", "Build internal productivity tools", ProjectStatus::Active, 1),
    ("Legacy Migration", "Migrate legacy systems to new infrastructure", ProjectStatus::Archived, 0),
];

// (name, color, project index)
const LABELS: [(&str, &str, usize); 5] = [
    ("Bug", "#FF0000", 0),
    ("Feature", "#00FF00", 0),
    ("Urgent", "#FF6600", 0),
    ("Backend", "#0000FF", 1),
    ("Frontend", "#00FFFF", 1),
];

const TASKS: [SeedTask; 7] = [
    SeedTask {
        title: "Design homepage mockup",
        description: "Create mockups for the new homepage design",
        status: TaskStatus::Done,
        priority: TaskPriority::High,
        project: 0,
        assignee: Some(1),
    },
    SeedTask {
        title: "Implement responsive navigation",
        description: "Build a mobile-friendly navigation menu",
        status: TaskStatus::InProgress,
        priority: TaskPriority::Medium,
        project: 0,
        assignee: Some(2),
    },
    SeedTask {
        title: "Fix header alignment issue",
        description: "Header is misaligned on mobile devices",
        status: TaskStatus::Todo,
        priority: TaskPriority::Urgent,
        project: 0,
        assignee: Some(2),
    },
    SeedTask {
        title: "Setup project structure",
        description: "Initialize React Native project with proper architecture",
        status: TaskStatus::Done,
        priority: TaskPriority::High,
        project: 1,
        assignee: Some(0),
    },
    SeedTask {
        title: "Implement authentication",
        description: "Add user authentication with JWT",
        status: TaskStatus::InProgress,
        priority: TaskPriority::High,
        project: 1,
        assignee: Some(1),
    },
    SeedTask {
        title: "Design app icon",
        description: "Create app icon for iOS and Android",
        status: TaskStatus::Todo,
        priority: TaskPriority::Low,
        project: 1,
        assignee: None,
    },
    SeedTask {
        title: "Build reporting dashboard",
        description: "Create dashboard for team metrics",
        status: TaskStatus::InProgress,
        priority: TaskPriority::Medium,
        project: 2,
        assignee: Some(1),
    },
];

// (task index, label index)
const TASK_LABELS: [(usize, usize); 4] = [(2, 0), (2, 2), (0, 1), (4, 3)];

// (task index, author index, content)
const COMMENTS: [(usize, usize, &str); 5] = [
    (0, 0, "Great work on the mockups! The design looks modern and clean."),
    (1, 2, "I'm working on this now. Should be done by end of day."),
    (2, 0, "This is blocking the mobile release. Please prioritize."),
    (2, 2, "I've investigated the issue. It's related to CSS flexbox."),
    (4, 1, "Authentication flow is working. Now adding refresh token logic."),
];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub projects: usize,
    pub labels: usize,
    pub tasks: usize,
    pub task_labels: usize,
    pub comments: usize,
}

/// Loads the sample dataset unless the store already has users. Returns
/// `None` when skipped.
pub fn seed_store(store: &dyn Store, bcrypt_cost: u32) -> AppResult<Option<SeedSummary>> {
    if store.count_users()? > 0 {
        tracing::info!("Store already has users, skipping seed");
        return Ok(None);
    }

    let mut user_ids: Vec<Uuid> = Vec::with_capacity(USERS.len());
    for (email, name, password, role) in USERS {
        let password_hash = hash(password, bcrypt_cost)?;
        let user = store.insert_user(NewUser::new(
            email.to_string(),
            password_hash,
            name.to_string(),
            role,
        ))?;
        user_ids.push(user.id);
    }

    let mut project_ids: Vec<Uuid> = Vec::with_capacity(PROJECTS.len());
    for (name, description, status, owner) in PROJECTS {
        let created = store.insert_project(NewProject::new(
            user_ids[owner],
            name.to_string(),
            Some(description.to_string()),
            status,
        ))?;
        project_ids.push(created.project.id);
    }

    let mut label_ids: Vec<Uuid> = Vec::with_capacity(LABELS.len());
    for (name, color, project) in LABELS {
        let label = store.insert_label(NewLabel::new(
            project_ids[project],
            name.to_string(),
            color.to_string(),
        ))?;
        label_ids.push(label.id);
    }

    let mut task_ids: Vec<Uuid> = Vec::with_capacity(TASKS.len());
    for seed in &TASKS {
        let now = chrono::Utc::now();
        let created = store.insert_task(NewTask {
            id: Uuid::new_v4(),
            title: seed.title.to_string(),
            description: Some(seed.description.to_string()),
            status: seed.status,
            priority: seed.priority,
            project_id: project_ids[seed.project],
            assignee_id: seed.assignee.map(|i| user_ids[i]),
            created_at: now,
            updated_at: now,
        })?;
        task_ids.push(created.task.id);
    }

    for (task, label) in TASK_LABELS {
        store.attach_label(task_ids[task], label_ids[label])?;
    }

    for (task, author, content) in COMMENTS {
        store.insert_comment(NewComment::new(
            task_ids[task],
            user_ids[author],
            content.to_string(),
        ))?;
    }

    let summary = SeedSummary {
        users: user_ids.len(),
        projects: project_ids.len(),
        labels: label_ids.len(),
        tasks: task_ids.len(),
        task_labels: TASK_LABELS.len(),
        comments: COMMENTS.len(),
    };
    tracing::info!(?summary, "Seeded sample data");
    Ok(Some(summary))
}
