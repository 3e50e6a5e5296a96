use std::process;

use sustainiq_storage::{StoredSubmission, SubmissionStore};

use crate::{report_error, OutputFormat};

pub(crate) async fn cmd_history(
    store: &dyn SubmissionStore,
    limit: Option<usize>,
    output: OutputFormat,
    quiet: bool,
) {
    let mut submissions = match store.list().await {
        Ok(submissions) => submissions,
        Err(e) => {
            report_error(&format!("error reading store: {e}"), output, quiet);
            process::exit(1);
        }
    };
    if let Some(limit) = limit {
        submissions.truncate(limit);
    }

    match output {
        OutputFormat::Text => print!("{}", render_text(&submissions)),
        OutputFormat::Json => match serde_json::to_string_pretty(&submissions) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                report_error(&format!("failed to encode history: {e}"), output, quiet);
                process::exit(1);
            }
        },
    }
}

fn render_text(submissions: &[StoredSubmission]) -> String {
    if submissions.is_empty() {
        return "No submissions recorded.\n".to_string();
    }
    let mut out = String::new();
    for entry in submissions {
        let Some(s) = entry.as_submission() else {
            out.push_str(&format!(
                "{}  (unrecognized entry)\n",
                entry.id().unwrap_or("-")
            ));
            continue;
        };
        let industry = s
            .input
            .get("industry")
            .and_then(|v| v.as_str())
            .unwrap_or("-");
        out.push_str(&format!(
            "{}  {}  score {:>3}  stage {}  {}  ({})\n",
            s.id, s.created_at, s.result.score, s.result.stage, s.result.title, industry
        ));
    }
    out
}
