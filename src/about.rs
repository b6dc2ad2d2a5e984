use crate::cli::InfoRequest;
use crate::constants::PROJECT_STATUS;
use crate::i18n::Translator;

const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
const LICENSE: &str = env!("CARGO_PKG_LICENSE");
const NAME: &str = env!("CARGO_PKG_NAME");
const REPOSITORY: &str = env!("CARGO_PKG_REPOSITORY");
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Splits `"Name <mail>"` into its parts. Cargo joins several authors with `:`;
/// only the first is used.
fn first_author(authors: &str) -> (&str, Option<&str>) {
    let first = authors.split(':').next().unwrap_or_default().trim();
    match (first.find('<'), first.rfind('>')) {
        (Some(open), Some(close)) if open < close => {
            (first[..open].trim(), Some(first[open + 1..close].trim()))
        }
        _ => (first, None),
    }
}

fn line(tr: &Translator, key: &str, value: Option<&str>) -> String {
    let value = match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => tr.t("about.unavailable"),
    };
    tr.format(key, &[("value", value)])
}

/// Renders the text printed for one metadata flag.
pub fn render_info(request: InfoRequest, tr: &Translator) -> String {
    let (author, email) = first_author(AUTHORS);
    match request {
        InfoRequest::Author => line(tr, "about.author", Some(author)),
        InfoRequest::Email => line(tr, "about.email", email),
        InfoRequest::License => line(tr, "about.license", Some(LICENSE)),
        InfoRequest::Status => line(tr, "about.status", Some(PROJECT_STATUS)),
        InfoRequest::Repository => line(tr, "about.repository", Some(REPOSITORY)),
        InfoRequest::About => [
            format!("{} {}", NAME, VERSION),
            DESCRIPTION.to_string(),
            line(tr, "about.version", Some(VERSION)),
            line(tr, "about.author", Some(author)),
            line(tr, "about.email", email),
            line(tr, "about.license", Some(LICENSE)),
            line(tr, "about.status", Some(PROJECT_STATUS)),
            line(tr, "about.repository", Some(REPOSITORY)),
        ]
        .join("\n"),
    }
}
