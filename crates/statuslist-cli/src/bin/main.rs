//! Status list CLI binary
use clap::{arg, value_parser, ArgAction, Command};
use serde_json::{to_string_pretty, Value};
use statuslist_cli::{
    encode_list, fetcher_config, parse_indices, read_json, status_str, verifier_endpoint,
    ListSummary,
};
use statuslist_core::bitstring::StatusListCodec;
use statuslist_core::checks::check_credential;
use statuslist_core::compression::GzipCompressor;
use statuslist_core::evaluator::StatusEvaluator;
use statuslist_core::DEFAULT_STATUS_LIST_SIZE;
use statuslist_http::client::{Auth, VerifierClient};
use statuslist_http::fetcher::HttpStatusListFetcher;
use std::{
    fs::File,
    io::{stdin, BufReader},
};

fn cli() -> Command {
    Command::new("Status List CLI")
        .about(format!("Status List CLI v{}\n\nCommand line interface for verifiable credential status lists.", env!("CARGO_PKG_VERSION")))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("list")
                .about("Status list functionality: encode, decode, status.")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("encode")
                        .about("Encodes a status list with the given indices set.")
                        .arg(
                            arg!(-s --size <SIZE>)
                                .required(false)
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(arg!(-i --indices <INDICES>).required(false))
                        .arg(arg!(-m --multibase).action(ArgAction::SetTrue)),
                )
                .subcommand(
                    Command::new("decode")
                        .about("Decodes a status list and prints its set indices.")
                        .arg(arg!(-e --encoded_list <ENCODED_LIST>).required(true))
                        .arg(arg!(-m --multibase).action(ArgAction::SetTrue)),
                )
                .subcommand(
                    Command::new("status")
                        .about("Gets the status at an index of a status list.")
                        .arg(arg!(-e --encoded_list <ENCODED_LIST>).required(true))
                        .arg(
                            arg!(-i --index <INDEX>)
                                .required(true)
                                .allow_hyphen_values(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(arg!(-m --multibase).action(ArgAction::SetTrue)),
                ),
        )
        .subcommand(
            Command::new("vc")
                .about("Verifiable credential functionality: status, verify.")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("status")
                        .about("Evaluates a credential's status against its published status lists.")
                        .arg(arg!(-v - -verbose).action(ArgAction::SetTrue))
                        .arg(arg!(-f --credential_file <CREDENTIAL_FILE>).required(false)),
                )
                .subcommand(
                    Command::new("verify")
                        .about("Posts a credential to a verifier.")
                        .arg(arg!(-v - -verbose).action(ArgAction::SetTrue))
                        .arg(arg!(-f --credential_file <CREDENTIAL_FILE>).required(false))
                        .arg(arg!(-e --endpoint <ENDPOINT>).required(false))
                        .arg(arg!(-t --token <TOKEN>).required(false)),
                ),
        )
}

fn codec(multibase: bool) -> StatusListCodec<GzipCompressor> {
    StatusListCodec::<GzipCompressor>::default().multibase(multibase)
}

/// Reads a credential from a file path or stdin.
fn read_credential(file_path: Option<&String>) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(match file_path {
        Some(file_path) => read_json(BufReader::new(File::open(file_path)?))?,
        None => read_json(stdin())?,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("list", sub_matches)) => match sub_matches.subcommand() {
            Some(("encode", sub_matches)) => {
                let size = sub_matches
                    .get_one::<usize>("size")
                    .copied()
                    .unwrap_or(DEFAULT_STATUS_LIST_SIZE);
                let indices = match sub_matches.get_one::<String>("indices") {
                    Some(indices) => parse_indices(indices)?,
                    None => Vec::new(),
                };
                let multibase = sub_matches.get_flag("multibase");
                println!("{}", encode_list(&codec(multibase), size, &indices)?);
            }
            Some(("decode", sub_matches)) => {
                let encoded_list = sub_matches.get_one::<String>("encoded_list").unwrap();
                let multibase = sub_matches.get_flag("multibase");
                let list = codec(multibase).decode(encoded_list)?;
                println!("{}", to_string_pretty(&ListSummary::from(&list))?);
            }
            Some(("status", sub_matches)) => {
                let encoded_list = sub_matches.get_one::<String>("encoded_list").unwrap();
                let index = *sub_matches.get_one::<i64>("index").unwrap();
                let multibase = sub_matches.get_flag("multibase");
                let list = codec(multibase).decode(encoded_list)?;
                println!("{}", list.get_status(index)?);
            }
            _ => panic!("Unrecognised list subcommand."),
        },
        Some(("vc", sub_matches)) => match sub_matches.subcommand() {
            Some(("status", sub_matches)) => {
                let verbose = sub_matches.get_flag("verbose");
                let credential =
                    read_credential(sub_matches.get_one::<String>("credential_file"))?;
                check_credential(&credential)?;
                let evaluator =
                    StatusEvaluator::new(HttpStatusListFetcher::new(&fetcher_config())?);
                let results = evaluator.get_credential_status(&credential).await?;
                if verbose {
                    println!("{}", to_string_pretty(&results)?);
                }
                for result in &results {
                    let purpose = result
                        .status_purpose
                        .as_ref()
                        .map(|purpose| purpose.to_string())
                        .unwrap_or_else(|| "status".to_string());
                    let label = format!(
                        "{}[{}] ({}) ",
                        result.status_list_credential, result.status_list_index, purpose
                    );
                    let details = result.status.then_some("asserted");
                    println!("{}", status_str(label, !result.status, details));
                }
            }
            Some(("verify", sub_matches)) => {
                let verbose = sub_matches.get_flag("verbose");
                let credential =
                    read_credential(sub_matches.get_one::<String>("credential_file"))?;
                let endpoint = verifier_endpoint(sub_matches.get_one::<String>("endpoint"))?;
                let auth = sub_matches
                    .get_one::<String>("token")
                    .map(|token| Auth::Oauth2BearerToken {
                        access_token: token.to_owned(),
                    });
                let client = VerifierClient::new(&endpoint, &fetcher_config())?;
                let outcome = client.verify(&credential, auth.as_ref()).await?;
                if verbose {
                    if let Some(body) = &outcome.body {
                        println!("{}", to_string_pretty(body)?);
                    }
                }
                let details = format!("status code {}", outcome.status_code);
                println!(
                    "{}",
                    status_str(
                        "Verified..... ".to_string(),
                        outcome.is_success() && outcome.verified() == Some(true),
                        Some(&details)
                    )
                );
            }
            _ => panic!("Unrecognised vc subcommand."),
        },
        _ => panic!("Unrecognised subcommand."),
    }
    Ok(())
}
