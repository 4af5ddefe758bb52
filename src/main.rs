//! # json-http
//!
//! A command line front end for `json_http_client`. It sends one request,
//! injects the given credentials, and prints the decoded JSON body of a `200`
//! response.
//!
//! ## Usage
//!
//! See `json-http --help` for usage.
//!
//! ### JSON body
//!
//! ```text,no_run
//! $ json-http -d '{"DummyField": "a123456"}' POST https://postman-echo.com/post
//! {
//!   "DummyField": "a123456"
//! }
//! ```
//!
//! ### Credentials
//!
//! ```text,no_run
//! $ json-http -t SuperSecretToken GET https://api.example.com/me
//! $ json-http -u user:pass DELETE https://api.example.com/items/1
//! ```
//!
//! ### Raw body
//!
//! Streams a file as `text/plain`:
//!
//! ```text,no_run
//! $ json-http -f notes.txt PUT https://api.example.com/notes/1
//! ```
//!
//! A non-`200` response is printed on stderr as the server's error object and
//! the process exits with status 1.
//!
//! ### Debugging
//!
//! `-v` logs every request and response. `RUST_LOG` is honoured as well.

use anyhow::{anyhow, Context, Result};
use clap::{App, Arg, ArgMatches};
use json_http_client::{ClientConfig, Method, Payload, RequestClient};
use log::LevelFilter;
use std::fs::File;
use std::process::exit;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let matches = App::new("json-http")
        .version(VERSION)
        .about("Sends a JSON request and prints the decoded response")
        .arg(
            Arg::with_name("METHOD")
                .required(true)
                .index(1)
                .possible_values(&["GET", "POST", "PUT", "PATCH", "DELETE"])
                .case_insensitive(true),
        )
        .arg(Arg::with_name("URL").required(true).index(2))
        .arg(
            Arg::with_name("DATA")
                .short("d")
                .long("data")
                .takes_value(true)
                .conflicts_with("DATA_FILE")
                .help("A JSON document sent as the request body"),
        )
        .arg(
            Arg::with_name("DATA_FILE")
                .short("f")
                .long("data-file")
                .takes_value(true)
                .help("A file streamed as-is as a text/plain request body"),
        )
        .arg(
            Arg::with_name("BEARER")
                .short("t")
                .long("bearer")
                .takes_value(true)
                .help("A token sent as 'Authorization: Bearer <token>'"),
        )
        .arg(
            Arg::with_name("USER")
                .short("u")
                .long("user")
                .takes_value(true)
                .help("Basic auth credentials as <user:password>"),
        )
        .arg(
            Arg::with_name("BASE")
                .short("b")
                .long("base")
                .takes_value(true)
                .help("The base address the client is created with [default: URL]"),
        )
        .arg(
            Arg::with_name("ACCEPT_INVALID_CERT")
                .short("k")
                .long("danger-accept-invalid-certs")
                .help("Skips certificate validation for https base addresses"),
        )
        .arg(
            Arg::with_name("DEBUG")
                .short("v")
                .long("debug")
                .help("Logs every request and response"),
        )
        .usage("json-http [OPTIONS] <METHOD> <URL>")
        .get_matches();

    let debug = matches.is_present("DEBUG");
    env_logger::Builder::new()
        .filter_level(if debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    if let Err(error) = run(&matches, debug) {
        eprintln!("{:#}", error);
        exit(1)
    }
}

fn run(matches: &ArgMatches, debug: bool) -> Result<()> {
    let method = parse_method(matches.value_of("METHOD").unwrap_or_default())?;
    let url = matches.value_of("URL").unwrap_or_default();
    let base = matches.value_of("BASE").unwrap_or(url);

    let config = ClientConfig::new(debug)
        .danger_accept_invalid_certs(matches.is_present("ACCEPT_INVALID_CERT"));
    let client = RequestClient::create(base, config)
        .with_context(|| format!("Failed creating a client for {}", base))?;

    if let Some(token) = matches.value_of("BEARER") {
        client.set_bearer_token(token);
    }
    if let Some(user) = matches.value_of("USER") {
        let (username, password) = user.split_once(':').unwrap_or((user, ""));
        client.set_basic_auth(username, password);
    }

    let payload = payload(matches)?;
    let reply = match client.execute(method.clone(), url, payload) {
        Ok(reply) => reply,
        Err(error) => {
            if let Some(remote) = error.remote() {
                return Err(anyhow!(
                    "{} {} returned {}\n{}",
                    method,
                    url,
                    remote.status,
                    serde_json::to_string_pretty(remote)?
                ));
            }
            return Err(error).with_context(|| format!("Failed executing {} {}", method, url));
        }
    };

    if !reply.body().is_empty() {
        let body: serde_json::Value = reply
            .json()
            .with_context(|| format!("Failed decoding the response of {} {}", method, url))?;
        println!("{}", serde_json::to_string_pretty(&body)?);
    }

    Ok(())
}

fn parse_method(method: &str) -> Result<Method> {
    match method.to_ascii_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        "PUT" => Ok(Method::PUT),
        "PATCH" => Ok(Method::PATCH),
        "DELETE" => Ok(Method::DELETE),
        other => Err(anyhow!("Unsupported method '{}'", other)),
    }
}

fn payload(matches: &ArgMatches) -> Result<Payload> {
    if let Some(data) = matches.value_of("DATA") {
        let value: serde_json::Value =
            serde_json::from_str(data).with_context(|| "The request body is not valid JSON")?;
        return Ok(Payload::json(&value)?);
    }
    if let Some(path) = matches.value_of("DATA_FILE") {
        let file = File::open(path).with_context(|| format!("Failed opening data file: {}", path))?;
        return Ok(Payload::reader(file));
    }
    Ok(Payload::Empty)
}
