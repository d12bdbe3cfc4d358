//! Email bodies rendered with Leptos SSR.
//!
//! Mail clients ignore `<style>` blocks inconsistently, so everything is
//! inline. Text content is escaped by the renderer; submitter input never
//! reaches `inner_html`.

use leptos::prelude::*;

use super::{ContactSubmission, JobApplication};

const BODY_STYLE: &str =
    "margin:0;padding:24px;background:#f4f4f5;font-family:Helvetica,Arial,sans-serif;color:#18181b";
const CARD_STYLE: &str = "max-width:560px;margin:0 auto;background:#ffffff;border-radius:8px;padding:32px";
const LABEL_STYLE: &str = "padding:6px 12px 6px 0;color:#71717a;font-size:13px;vertical-align:top;white-space:nowrap";
const VALUE_STYLE: &str = "padding:6px 0;font-size:14px";
const PARA_STYLE: &str = "margin:0 0 12px;font-size:14px;line-height:1.6";

/// Rendered email, HTML plus a plain-text alternative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailBody {
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[component]
fn EmailLayout(title: String, children: Children) -> impl IntoView {
    let heading = title.clone();
    view! {
        <html>
            <head>
                <meta charset="UTF-8" />
                <title>{title}</title>
            </head>
            <body style=BODY_STYLE>
                <div style=CARD_STYLE>
                    <h1 style="margin:0 0 24px;font-size:20px">{heading}</h1>
                    {children()}
                </div>
                <p style="text-align:center;color:#a1a1aa;font-size:12px">
                    "Sent from the Northlight Studio website"
                </p>
            </body>
        </html>
    }
}

#[component]
fn Field(label: &'static str, value: String) -> impl IntoView {
    view! {
        <tr>
            <td style=LABEL_STYLE>{label}</td>
            <td style=VALUE_STYLE>{value}</td>
        </tr>
    }
}

#[component]
fn OptionalField(label: &'static str, value: Option<String>) -> impl IntoView {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(value) => view! { <Field label=label value=value /> }.into_any(),
        None => view! { "" }.into_any(),
    }
}

/// Free text split into paragraphs on blank lines.
#[component]
fn Paragraphs(text: String) -> impl IntoView {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| view! { <p style=PARA_STYLE>{p.to_string()}</p> })
        .collect::<Vec<_>>()
}

#[component]
fn ContactEmail(submission: ContactSubmission) -> impl IntoView {
    let title = format!("New enquiry from {}", submission.name);
    view! {
        <EmailLayout title=title>
            <table style="border-collapse:collapse;margin-bottom:20px">
                <Field label="Name" value=submission.name />
                <Field label="Email" value=submission.email />
                <OptionalField label="Company" value=submission.company />
                <OptionalField label="Budget" value=submission.budget />
            </table>
            <Paragraphs text=submission.message />
        </EmailLayout>
    }
}

#[component]
fn ApplicationEmail(application: JobApplication) -> impl IntoView {
    let title = format!("Application: {}", application.job_title);
    view! {
        <EmailLayout title=title>
            <table style="border-collapse:collapse;margin-bottom:20px">
                <Field label="Position" value=application.job_title />
                <Field label="Name" value=application.name />
                <Field label="Email" value=application.email />
                <OptionalField label="Phone" value=application.phone />
                <OptionalField label="Portfolio" value=application.portfolio_url />
            </table>
            <h2 style="font-size:15px;margin:0 0 12px">"Cover letter"</h2>
            <Paragraphs text=application.cover_letter />
        </EmailLayout>
    }
}

fn document(view: impl IntoView) -> String {
    format!("<!DOCTYPE html>\n{}", view.to_html())
}

fn text_fields(fields: &[(&str, Option<&str>)], body_label: &str, body: &str) -> String {
    let mut out = String::new();
    for (label, value) in fields {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            out.push_str(&format!("{label}: {value}\n"));
        }
    }
    out.push_str(&format!("\n{body_label}:\n{}\n", body.trim()));
    out
}

pub fn render_contact(submission: &ContactSubmission) -> EmailBody {
    let subject = format!("New enquiry from {}", submission.name);
    let text = text_fields(
        &[
            ("Name", Some(submission.name.as_str())),
            ("Email", Some(submission.email.as_str())),
            ("Company", submission.company.as_deref()),
            ("Budget", submission.budget.as_deref()),
        ],
        "Message",
        &submission.message,
    );
    let submission = submission.clone();
    let html = document(view! { <ContactEmail submission=submission /> });
    EmailBody {
        subject,
        html,
        text,
    }
}

pub fn render_application(application: &JobApplication) -> EmailBody {
    let subject = format!(
        "Application: {} ({})",
        application.job_title, application.name
    );
    let text = text_fields(
        &[
            ("Position", Some(application.job_title.as_str())),
            ("Name", Some(application.name.as_str())),
            ("Email", Some(application.email.as_str())),
            ("Phone", application.phone.as_deref()),
            ("Portfolio", application.portfolio_url.as_deref()),
        ],
        "Cover letter",
        &application.cover_letter,
    );
    let application = application.clone();
    let html = document(view! { <ApplicationEmail application=application /> });
    EmailBody {
        subject,
        html,
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn contact() -> ContactSubmission {
        ContactSubmission {
            name: "Dana Reyes".into(),
            email: "dana@example.com".into(),
            company: Some("Reyes & Co".into()),
            budget: None,
            message: "We need a new site.\n\n<script>alert(1)</script>".into(),
        }
    }

    #[test]
    fn contact_html_is_a_document_with_escaped_input() {
        let body = render_contact(&contact());
        assert_eq!(body.subject, "New enquiry from Dana Reyes");
        assert!(body.html.starts_with("<!DOCTYPE html>"));
        assert!(body.html.contains("Reyes &amp; Co"));
        assert!(body.html.contains("&lt;script"));
        assert!(!body.html.contains("<script>"));
        assert!(!body.html.contains("Budget"));
    }

    #[test]
    fn contact_text_skips_missing_fields() {
        let text = render_contact(&contact()).text;
        assert!(text.starts_with("Name: Dana Reyes\nEmail: dana@example.com\nCompany: Reyes & Co\n"));
        assert!(!text.contains("Budget"));
        assert!(text.contains("Message:\nWe need a new site."));
    }

    #[test]
    fn application_mentions_position_and_portfolio() {
        let body = render_application(&JobApplication {
            job_title: "Senior Designer".into(),
            name: "Lee Park".into(),
            email: "lee@example.com".into(),
            phone: Some("  ".into()),
            portfolio_url: Some("https://lee.design".into()),
            cover_letter: "Hello.".into(),
        });
        assert_eq!(body.subject, "Application: Senior Designer (Lee Park)");
        assert!(body.html.contains("https://lee.design"));
        assert!(body.html.contains("Cover letter"));
        assert!(!body.text.contains("Phone"));
        assert!(body.text.contains("Portfolio: https://lee.design"));
    }
}
