use log::error;
use std::env;

const USAGE: &str = "Usage: cinescrape <search|details|episodes|stream> <keyword-or-reference>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let operation = args.get(1).ok_or(USAGE)?;
    let argument = args.get(2).ok_or(USAGE)?;

    let output = match operation.as_str() {
        "search" => serde_json::to_string_pretty(&cinescrape::search(argument).await)?,
        "details" => serde_json::to_string_pretty(&cinescrape::details(argument).await)?,
        "episodes" => serde_json::to_string_pretty(&cinescrape::episodes(argument).await)?,
        "stream" => serde_json::to_string_pretty(&cinescrape::resolve_stream(argument).await)?,
        other => {
            error!("Unknown operation: {other}");
            return Err(USAGE.into());
        }
    };
    println!("{output}");

    Ok(())
}
