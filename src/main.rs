//! # http_exchange - Entry Point
//! src/main.rs
//!
//! Punto de entrada del binario: parsea la CLI y despacha al servidor o
//! al cliente según el subcomando.

use clap::Parser;
use http_exchange::client::Client;
use http_exchange::config::{Cli, Command, FetchConfig, ServeConfig};
use http_exchange::http::{ConsoleObserver, HttpError, Request};
use http_exchange::server::Server;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(config) => run_serve(config),
        Command::Fetch(config) => run_fetch(config),
    }
}

fn run_serve(config: ServeConfig) {
    println!("=================================");
    println!("  http_exchange - HTTP/1.x Server");
    println!("=================================\n");

    if let Err(e) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", e);
        std::process::exit(1);
    }

    println!("⚙️  Configuración:");
    println!("   Address: {}", config.address());
    println!("   Page:    {}", config.page);
    println!();

    let server = Server::new(config);
    if let Err(e) = server.run() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}

fn run_fetch(config: FetchConfig) {
    if let Err(e) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = fetch(&config) {
        eprintln!("💥 {}", e);
        std::process::exit(1);
    }
}

fn fetch(config: &FetchConfig) -> Result<(), HttpError> {
    println!("[*] Conectando a {}", config.address());
    let mut client = Client::connect(&config.host, config.port)?;

    // Con body el request es un POST con Content-Length; sin body, un GET
    let request = match &config.body {
        Some(body) => Request::new("POST", &config.target).with_body(body),
        None => Request::new("GET", &config.target),
    };
    println!("[+] {} {}\n", request.method(), request.target());

    let mut observer = ConsoleObserver;
    let response = client.fetch(&request, &mut observer)?;

    println!();
    if let Some(text) = response.body_string() {
        println!("{}", text);
    } else {
        println!("({} bytes de body no-UTF8)", response.body().len());
    }

    Ok(())
}
