use std::error::Error;
use std::io::Write;
use colored::*;
use rustyline::DefaultEditor;

use crate::config::Settings;
use crate::query::Direction;
use super::command_handlers::{
    BrowseContext,
    handle_chart,
    handle_compare,
    handle_developer,
    handle_developers,
    handle_list_models,
    handle_metrics,
    handle_providers,
    handle_recommend,
    handle_red_teaming,
    handle_show_model,
};

/// Search, filter and sort applied to every table the browser requests
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    pub search: String,
    pub developer: String,
    pub sort: String,
    pub direction: Direction,
}

impl TableState {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            search: String::new(),
            developer: String::new(),
            sort: settings.views.default_sort.clone(),
            direction: settings.views.default_direction.parse().unwrap_or_default(),
        }
    }
}

/// One line of browser input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Clear,
    Exit,
    Models,
    Search(String),
    Developer(String),
    Sort { key: String, direction: Option<Direction> },
    Show(String),
    Compare(Vec<String>),
    RedTeam,
    Chart(String),
    Top { metric: String, count: Option<usize> },
    Providers(Option<String>),
    Developers,
    DeveloperModels(String),
    Metrics,
    Usage(&'static str),
    Unknown(String),
}

/// Parses one line of input. Command words are case-insensitive, arguments
/// keep their case.
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let (word, rest) = match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    match word.to_lowercase().as_str() {
        "help" => Command::Help,
        "clear" => Command::Clear,
        "exit" | "quit" | "bye" => Command::Exit,
        "models" | "ls" => Command::Models,
        "search" => Command::Search(rest.to_string()),
        "dev" | "filter" => Command::Developer(rest.to_string()),
        "sort" => match args.as_slice() {
            [key] => Command::Sort { key: key.to_string(), direction: None },
            [key, dir] => match dir.parse() {
                Ok(direction) => Command::Sort { key: key.to_string(), direction: Some(direction) },
                Err(_) => Command::Usage("sort <key> [asc|desc]"),
            },
            _ => Command::Usage("sort <key> [asc|desc]"),
        },
        "show" => match args.as_slice() {
            [id] => Command::Show(id.to_string()),
            _ => Command::Usage("show <model-id>"),
        },
        "compare" => {
            let ids: Vec<String> = rest
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect();
            if ids.is_empty() {
                Command::Usage("compare <model-id> <model-id> ...")
            } else {
                Command::Compare(ids)
            }
        }
        "redteam" | "red-teaming" => Command::RedTeam,
        "chart" => match args.as_slice() {
            [metric] => Command::Chart(metric.to_string()),
            _ => Command::Usage("chart <metric>"),
        },
        "top" => match args.as_slice() {
            [metric] => Command::Top { metric: metric.to_string(), count: None },
            [metric, count] => match count.parse() {
                Ok(count) => Command::Top { metric: metric.to_string(), count: Some(count) },
                Err(_) => Command::Usage("top <metric> [count]"),
            },
            _ => Command::Usage("top <metric> [count]"),
        },
        "providers" => Command::Providers(args.first().map(|id| id.to_string())),
        "developers" => Command::Developers,
        "developer" => {
            if rest.is_empty() {
                Command::Usage("developer <name>")
            } else {
                Command::DeveloperModels(rest.to_string())
            }
        }
        "metrics" => Command::Metrics,
        _ => Command::Unknown(input.to_string()),
    }
}

fn print_help() {
    println!("\n{}", "Modelboard Browser Commands".cyan());
    println!("{}", "=".repeat(60).bright_cyan());
    println!("{}               - List models with the current search, filter and sort", "models".green());
    println!("{}        - Search by model or developer name (empty clears)", "search <term>".green());
    println!("{}           - Only show one developer (empty clears)", "dev <name>".green());
    println!("{} - Sort the model table", "sort <key> [asc|desc]".green());
    println!("{}       - Model details and providers", "show <model-id>".green());
    println!("{}     - Compare models side by side", "compare <ids...>".green());
    println!("{}              - Red-teaming leaderboard", "redteam".green());
    println!("{}       - Chart a metric over the model table", "chart <metric>".green());
    println!("{} - Best models for a metric", "top <metric> [count]".green());
    println!("{}  - Provider pricing", "providers [model-id]".green());
    println!("{}           - Developers and their best rank", "developers".green());
    println!("{}     - Models of one developer", "developer <name>".green());
    println!("{}              - Metric ids for chart and top", "metrics".green());
    println!("{}                - Clear the screen", "clear".green());
    println!("{}      - Exit the browser", "exit, bye, quit".green());
    println!();
}

fn print_state(state: &TableState) {
    let search = if state.search.is_empty() { "-" } else { state.search.as_str() };
    let developer = if state.developer.is_empty() { "all" } else { state.developer.as_str() };
    println!(
        "{}",
        format!("search: {} | developer: {} | sort: {} {}", search, developer, state.sort, state.direction).bright_black()
    );
}

// --- Main Browse Loop ---

pub async fn browse_loop(settings: &Settings) -> Result<(), Box<dyn Error + Send + Sync>> {
    println!("Starting model browser");
    print_help();

    let mut rl = DefaultEditor::new()?;
    let client = reqwest::Client::new();
    let server_url = settings.server_url();
    let mut state = TableState::from_settings(settings);

    loop {
        let input = match rl.readline("> ") {
            Ok(input) => input,
            Err(_) => {
                println!("Goodbye!");
                break;
            }
        };
        let input_trimmed = input.trim();
        if input_trimmed.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(input_trimmed);

        let context = BrowseContext {
            client: &client,
            server_url: &server_url,
        };

        match parse_command(input_trimmed) {
            Command::Help => print_help(),
            Command::Clear => {
                print!("\x1B[2J\x1B[1;1H");
                std::io::stdout().flush()?;
            }
            Command::Exit => {
                println!("Goodbye!");
                break;
            }
            Command::Models => handle_list_models(&context, &state).await,
            Command::Search(term) => {
                state.search = term;
                print_state(&state);
                handle_list_models(&context, &state).await;
            }
            Command::Developer(name) => {
                state.developer = name;
                print_state(&state);
                handle_list_models(&context, &state).await;
            }
            Command::Sort { key, direction } => {
                state.sort = key;
                if let Some(direction) = direction {
                    state.direction = direction;
                }
                print_state(&state);
                handle_list_models(&context, &state).await;
            }
            Command::Show(id) => handle_show_model(&context, &id).await,
            Command::Compare(ids) => handle_compare(&context, &ids).await,
            Command::RedTeam => handle_red_teaming(&context).await,
            Command::Chart(metric) => handle_chart(&context, &state, &metric).await,
            Command::Top { metric, count } => handle_recommend(&context, &metric, count).await,
            Command::Providers(model) => handle_providers(&context, model.as_deref()).await,
            Command::Developers => handle_developers(&context).await,
            Command::DeveloperModels(name) => handle_developer(&context, &state, &name).await,
            Command::Metrics => handle_metrics(&context).await,
            Command::Usage(usage) => println!("Usage: {}", usage),
            Command::Unknown(input) => println!("Unknown command '{}'. Type 'help' for the command list.", input),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("  QUIT "), Command::Exit);
        assert_eq!(parse_command("search Claude 3.5"), Command::Search("Claude 3.5".to_string()));
        assert_eq!(parse_command("search"), Command::Search(String::new()));
        assert_eq!(
            parse_command("sort mathLiveBench desc"),
            Command::Sort { key: "mathLiveBench".to_string(), direction: Some(Direction::Desc) }
        );
        assert_eq!(parse_command("sort"), Command::Usage("sort <key> [asc|desc]"));
        assert_eq!(
            parse_command("compare gpt-4o, claude-3-5-sonnet"),
            Command::Compare(vec!["gpt-4o".to_string(), "claude-3-5-sonnet".to_string()])
        );
        assert_eq!(
            parse_command("top inputCost 3"),
            Command::Top { metric: "inputCost".to_string(), count: Some(3) }
        );
        assert_eq!(parse_command("top inputCost many"), Command::Usage("top <metric> [count]"));
        assert_eq!(parse_command("developer Mistral AI"), Command::DeveloperModels("Mistral AI".to_string()));
        assert_eq!(parse_command("providers"), Command::Providers(None));
        assert!(matches!(parse_command("dance"), Command::Unknown(_)));
    }
}
