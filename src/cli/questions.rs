use crate::api::{AskbotClient, SearchFilter};
use crate::columns::{project, visible_columns, COLUMNS};
use crate::config::{AppConfig, Settings};
use crate::output::{print_questions, OutputFormat};
use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub struct QuestionsArgs {
    /// Print an aligned table (default)
    #[arg(short = 'P', long, conflicts_with_all = ["csv", "template"])]
    #[allow(dead_code)]
    pretty: bool,
    /// Print CSV rows
    #[arg(short = 'C', long, conflicts_with = "template")]
    csv: bool,
    /// Render rows through a template file
    #[arg(short = 'T', long, value_name = "FILE")]
    template: Option<PathBuf>,

    /// Only questions with this tag (repeatable)
    #[arg(short = 't', long = "tag", value_name = "TAG")]
    tags: Vec<String>,
    /// Free-text search
    #[arg(short, long)]
    query: Option<String>,
    /// Numeric id of the question author
    #[arg(short, long)]
    author: Option<String>,
    /// One of age, activity, answers, votes, relevance followed by -asc or -desc
    #[arg(short, long, default_value = "age-desc")]
    sort: String,
    /// all or unanswered
    #[arg(short = 'S', long, default_value = "all")]
    scope: String,
    /// Same as --scope unanswered
    #[arg(short, long, conflicts_with_all = ["scope", "all"])]
    unanswered: bool,
    /// Same as --scope all
    #[arg(short = 'A', long, conflicts_with = "scope")]
    all: bool,

    /// API base URL, e.g. https://ask.example.org/api/v1
    #[arg(short = 'E', long)]
    endpoint: Option<String>,
    /// Stop after this many questions
    #[arg(short, long)]
    limit: Option<NonZeroUsize>,
    /// Column to show (repeatable); defaults to all but URL and Score
    #[arg(short = 'c', long = "column", value_name = "LABEL")]
    columns: Vec<String>,
}

impl QuestionsArgs {
    fn filter(&self) -> SearchFilter {
        let scope = if self.unanswered {
            "unanswered"
        } else if self.all {
            "all"
        } else {
            self.scope.as_str()
        };

        SearchFilter {
            author: self.author.clone(),
            scope: Some(scope.to_string()),
            sort: Some(self.sort.clone()),
            tags: self.tags.clone(),
            query: self.query.clone(),
        }
    }

    fn output_format(&self) -> Result<OutputFormat> {
        if let Some(path) = &self.template {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read template {}", path.display()))?;
            return Ok(OutputFormat::Template(source));
        }

        Ok(if self.csv {
            OutputFormat::Csv
        } else {
            OutputFormat::Table
        })
    }
}

pub async fn questions_list(args: QuestionsArgs, config_file: Option<PathBuf>) -> Result<()> {
    let filter = args.filter();
    filter.validate()?;
    let visible = visible_columns(&COLUMNS, &args.columns)?;
    let format = args.output_format()?;

    let app_config = match config_file {
        Some(path) => AppConfig::at(path),
        None => AppConfig::new()?,
    };
    let file = app_config.load()?;
    if file.is_some() {
        info!(path = %app_config.config_file_path().display(), "loaded config file");
    }

    let settings = Settings::resolve(args.endpoint, args.limit, file)?;
    let client = AskbotClient::new(settings.endpoint.as_deref())?;
    info!(url = %client.questions_url(), limit = ?settings.limit, "searching questions");

    let mut cursor = client.questions(&filter, settings.limit)?;
    let mut rows = Vec::new();
    while let Some(question) = cursor.next().await? {
        rows.push(project(&question, &COLUMNS));
    }
    info!(
        questions = cursor.emitted(),
        page = cursor.page(),
        pages = ?cursor.pages(),
        "search finished"
    );

    print_questions(&format, &COLUMNS, &rows, &visible)
}
