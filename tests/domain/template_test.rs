use docflow::domain::{builtin_templates, find_template, template_categories};

#[test]
fn given_builtin_catalogue_when_listing_then_has_six_templates_with_content() {
    let templates = builtin_templates();

    assert_eq!(templates.len(), 6);
    assert!(templates.iter().all(|t| !t.content.trim().is_empty()));
}

#[test]
fn given_template_name_when_deriving_file_name_then_lowercases_and_hyphenates() {
    let template = find_template("business-report").unwrap();
    assert_eq!(template.file_name(), "business-report.txt");

    let email = find_template("email-template").unwrap();
    assert_eq!(email.file_name(), "professional-email.txt");
    assert_eq!(email.media_type(), "text/plain");
}

#[test]
fn given_unknown_id_when_finding_template_then_returns_none() {
    assert!(find_template("novel").is_none());
}

#[test]
fn given_catalogue_when_listing_categories_then_each_appears_once() {
    let categories = template_categories();
    let mut deduped = categories.clone();
    deduped.dedup();

    assert_eq!(categories, deduped);
    assert!(categories.contains(&"Business"));
}
