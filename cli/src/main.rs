mod arg_parser;
mod client_cli;

use arg_parser::{ArgParser, SubCommand};
use client_cli::ClientCli;

use clap::Parser;
use std::error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn error::Error>> {
    let args = ArgParser::parse();
    let client = ClientCli::new(&args.server);

    match args.sub_command {
        SubCommand::Submit { name, args } => client.submit(&name, &args).await?,
        SubCommand::List => client.list().await?,
        SubCommand::Get { job_id } => client.get(&job_id).await?,
        SubCommand::Stats => client.stats().await?,
    }

    Ok(())
}
