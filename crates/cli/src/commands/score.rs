use std::process;

use sustainiq_core::{compute, validate, FormAnswers, SnapshotInput, SnapshotResult};

use crate::{report_error, OutputFormat};

/// Answers given on the command line.
pub(crate) struct ScoreArgs {
    pub(crate) industry: Option<String>,
    pub(crate) size: String,
    pub(crate) tracking: String,
    pub(crate) challenge: String,
    /// Answers are form slugs rather than backend labels.
    pub(crate) form: bool,
}

impl ScoreArgs {
    fn into_payload(self) -> serde_json::Value {
        if self.form {
            return FormAnswers {
                industry: self.industry.unwrap_or_default(),
                size: self.size,
                tracking: self.tracking,
                challenge: self.challenge,
            }
            .into_payload();
        }
        SnapshotInput::new(
            self.industry.as_deref(),
            &self.size,
            &self.tracking,
            &self.challenge,
        )
        .to_payload()
    }
}

pub(crate) fn cmd_score(args: ScoreArgs, output: OutputFormat, quiet: bool) {
    let payload = args.into_payload();
    let input = match validate(&payload) {
        Ok(input) => input,
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(1);
        }
    };

    let result = compute(&input);
    match output {
        OutputFormat::Text => print!("{}", render_text(&result)),
        OutputFormat::Json => match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                report_error(&format!("failed to encode result: {e}"), output, quiet);
                process::exit(1);
            }
        },
    }
}

fn render_text(result: &SnapshotResult) -> String {
    let mut out = format!(
        "Score: {}/100\nStage {}: {}\n{}\nRecommended: {}\nNext steps:\n",
        result.score, result.stage, result.title, result.desc, result.engagement
    );
    for (i, step) in result.next_steps.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, step));
    }
    out
}
