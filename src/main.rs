use anyhow::anyhow;
use board::{
    action::Action,
    api_client::ApiClient,
    common::{
        article::{ArticleSearchType, ListArticlesParams},
        comment::ListCommentsParams,
        newtypes::{ArticleId, CommentId},
    },
    config::BoardConfig,
};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use serde::Serialize;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "board", about = "Command line client for the board api")]
struct Cli {
    /// Print the default configuration with documentation and exit
    #[arg(long)]
    print_config: bool,
    /// Path of the config file, without extension
    #[arg(long, env = "BOARD_CONFIG", default_value = "config")]
    config: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(subcommand)]
    Article(ArticleCommand),
    #[command(subcommand)]
    Comment(CommentCommand),
}

#[derive(Subcommand, Debug)]
enum ArticleCommand {
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    Delete {
        #[arg(long)]
        id: i64,
    },
    Get {
        #[arg(long)]
        id: i64,
    },
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
        #[arg(long)]
        keyword: Option<String>,
        #[arg(long, value_enum)]
        search_type: Option<SearchType>,
    },
}

#[derive(Subcommand, Debug)]
enum CommentCommand {
    Create {
        #[arg(long)]
        article_id: i64,
        #[arg(long)]
        content: String,
    },
    Update {
        #[arg(long)]
        article_id: i64,
        #[arg(long)]
        comment_id: i64,
        #[arg(long)]
        content: String,
    },
    Delete {
        #[arg(long)]
        article_id: i64,
        #[arg(long)]
        comment_id: i64,
    },
    Get {
        #[arg(long)]
        article_id: i64,
        #[arg(long)]
        comment_id: i64,
    },
    List {
        #[arg(long)]
        article_id: i64,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SearchType {
    Title,
    Content,
    TitleAndContent,
    Author,
}

impl From<SearchType> for ArticleSearchType {
    fn from(value: SearchType) -> Self {
        match value {
            SearchType::Title => ArticleSearchType::Title,
            SearchType::Content => ArticleSearchType::Content,
            SearchType::TitleAndContent => ArticleSearchType::TitleAndContent,
            SearchType::Author => ArticleSearchType::Author,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    if cli.print_config {
        println!("{}", doku::to_toml::<BoardConfig>());
        return Ok(ExitCode::SUCCESS);
    }

    env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .filter_module("board", LevelFilter::Info)
        .parse_default_env()
        .init();

    let Some(command) = cli.command else {
        return Err(anyhow!("No command given, see --help"));
    };
    let config = BoardConfig::read(&cli.config)?;
    let client = ApiClient::from_config(&config)?;

    match command {
        Command::Article(ArticleCommand::Create { title, content }) => {
            perform(&client, &config, Action::CreateArticle { title, content }).await
        }
        Command::Article(ArticleCommand::Update { id, title, content }) => {
            let action = Action::UpdateArticle {
                id: ArticleId(id),
                title,
                content,
            };
            perform(&client, &config, action).await
        }
        Command::Article(ArticleCommand::Delete { id }) => {
            perform(&client, &config, Action::DeleteArticle { id: ArticleId(id) }).await
        }
        Command::Article(ArticleCommand::Get { id }) => {
            print_json(&client.get_article(ArticleId(id)).await?)
        }
        Command::Article(ArticleCommand::List {
            page,
            size,
            keyword,
            search_type,
        }) => {
            let params = ListArticlesParams {
                page,
                size,
                keyword,
                search_type: search_type.map(Into::into),
            };
            print_json(&client.list_articles(&params).await?)
        }
        Command::Comment(CommentCommand::Create {
            article_id,
            content,
        }) => {
            let action = Action::CreateComment {
                article_id: ArticleId(article_id),
                content,
            };
            perform(&client, &config, action).await
        }
        Command::Comment(CommentCommand::Update {
            article_id,
            comment_id,
            content,
        }) => {
            let action = Action::UpdateComment {
                article_id: ArticleId(article_id),
                comment_id: CommentId(comment_id),
                content,
            };
            perform(&client, &config, action).await
        }
        Command::Comment(CommentCommand::Delete {
            article_id,
            comment_id,
        }) => {
            let action = Action::DeleteComment {
                article_id: ArticleId(article_id),
                comment_id: CommentId(comment_id),
            };
            perform(&client, &config, action).await
        }
        Command::Comment(CommentCommand::Get {
            article_id,
            comment_id,
        }) => print_json(
            &client
                .get_comment(ArticleId(article_id), CommentId(comment_id))
                .await?,
        ),
        Command::Comment(CommentCommand::List {
            article_id,
            page,
            size,
        }) => {
            let params = ListCommentsParams { page, size };
            print_json(&client.list_comments(ArticleId(article_id), &params).await?)
        }
    }
}

/// Prints the notice like the web page would show it, exit code tells whether the
/// action succeeded.
async fn perform(
    client: &ApiClient,
    config: &BoardConfig,
    action: Action,
) -> anyhow::Result<ExitCode> {
    let notice = client.perform(&action, &config.board.path).await;
    println!("{}", notice.message);
    println!("-> {}", notice.redirect);
    Ok(ExitCode::from(notice.exit_status()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(ExitCode::SUCCESS)
}
