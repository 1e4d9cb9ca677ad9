use super::media_type::TEXT_PLAIN;

/// Built-in starter document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub content: &'static str,
}

impl DocumentTemplate {
    /// `Business Report` becomes `business-report.txt`.
    pub fn file_name(&self) -> String {
        let slug = self
            .name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        format!("{slug}.txt")
    }

    pub fn media_type(&self) -> &'static str {
        TEXT_PLAIN
    }
}

static TEMPLATES: [DocumentTemplate; 6] = [
    DocumentTemplate {
        id: "business-report",
        name: "Business Report",
        description: "Professional business analysis template",
        category: "Business",
        content: include_str!("../../templates/business-report.md"),
    },
    DocumentTemplate {
        id: "academic-essay",
        name: "Academic Essay",
        description: "Structured academic writing format",
        category: "Academic",
        content: include_str!("../../templates/academic-essay.md"),
    },
    DocumentTemplate {
        id: "meeting-minutes",
        name: "Meeting Minutes",
        description: "Template for recording meeting discussions",
        category: "Business",
        content: include_str!("../../templates/meeting-minutes.md"),
    },
    DocumentTemplate {
        id: "project-proposal",
        name: "Project Proposal",
        description: "Comprehensive project planning template",
        category: "Business",
        content: include_str!("../../templates/project-proposal.md"),
    },
    DocumentTemplate {
        id: "email-template",
        name: "Professional Email",
        description: "Well-structured email template",
        category: "Communication",
        content: include_str!("../../templates/email-template.md"),
    },
    DocumentTemplate {
        id: "research-notes",
        name: "Research Notes",
        description: "Organized research documentation",
        category: "Academic",
        content: include_str!("../../templates/research-notes.md"),
    },
];

pub fn builtin_templates() -> &'static [DocumentTemplate] {
    &TEMPLATES
}

pub fn find_template(id: &str) -> Option<&'static DocumentTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Distinct categories in first-seen order.
pub fn template_categories() -> Vec<&'static str> {
    let mut categories: Vec<&'static str> = Vec::new();
    for template in &TEMPLATES {
        if !categories.contains(&template.category) {
            categories.push(template.category);
        }
    }
    categories
}
