//! Markdown report writing

use chrono::Local;
use std::path::{Path, PathBuf};

use crate::application::errors::AppError;
use crate::application::services::pipeline::PipelineOutput;

/// Write the run's report into the output folder, returning its path
pub fn write_report(output_folder: &Path, output: &PipelineOutput) -> Result<PathBuf, AppError> {
    std::fs::create_dir_all(output_folder)?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S_%3f");
    let path = output_folder.join(format!("generated_replies_{}.md", timestamp));

    std::fs::write(&path, render_report(output))?;
    tracing::info!("Report written to {}", path.display());

    Ok(path)
}

/// Render the report body
fn render_report(output: &PipelineOutput) -> String {
    let mut out = String::new();

    out.push_str("# Generated Replies\n\n");
    out.push_str("## Original Tweet\n\n");
    out.push_str(&format!("{}\n\n", output.tweet.text));
    out.push_str(&format!("by @{}\n\n", output.tweet.author.screen_name));

    out.push_str("## Generated Replies\n\n");
    for (i, reply) in output.replies.iter().enumerate() {
        out.push_str(&format!("{}. {}\n\n", i + 1, reply));
    }

    out.push_str("## Tweet Analysis\n\n");
    out.push_str(&format!("{}\n\n", output.analysis));

    out.push_str("## Tweet Context\n\n");
    out.push_str(&format!("{}\n\n", output.context.render()));

    if !output.context.media_descriptions.is_empty() {
        out.push_str("## Media Descriptions\n\n");
        for desc in &output.context.media_descriptions {
            out.push_str(&format!("- {}\n", desc));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::tweet::{Tweet, TweetAuthor};
    use crate::domain::entities::TweetContext;

    fn sample_output() -> PipelineOutput {
        let tweet = Tweet {
            id: Some("1".to_string()),
            text: "Fast inference is here".to_string(),
            author: TweetAuthor {
                name: "Groq Inc".to_string(),
                screen_name: "GroqInc".to_string(),
                avatar_url: None,
                banner_url: None,
            },
            media: None,
            quote: None,
            created_at: None,
            likes: None,
            retweets: None,
            replies: None,
        };
        let mut context = TweetContext::new(tweet.clone());
        context.media_descriptions.push("A chip close-up".to_string());

        PipelineOutput {
            tweet,
            context,
            analysis: "Positive, product launch".to_string(),
            replies: vec!["Congrats!".to_string(), "How fast exactly?".to_string()],
        }
    }

    #[test]
    fn test_render_report_sections() {
        let report = render_report(&sample_output());

        assert!(report.starts_with("# Generated Replies"));
        assert!(report.contains("by @GroqInc"));
        assert!(report.contains("1. Congrats!"));
        assert!(report.contains("2. How fast exactly?"));
        assert!(report.contains("## Tweet Analysis\n\nPositive, product launch"));
        assert!(report.contains("- A chip close-up"));
    }

    #[test]
    fn test_write_report_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_report(dir.path(), &sample_output()).unwrap();

        assert!(path.exists());
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("generated_replies_"));
        assert!(name.ends_with(".md"));

        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.contains("Fast inference is here"));
    }
}
