//! # Configuración
//! src/config.rs
//!
//! Configuración del binario con soporte completo para argumentos CLI y
//! variables de entorno. Hay dos modos de operación, cada uno con su
//! propio bloque de opciones:
//!
//! ## Servidor
//! ```bash
//! ./http_exchange serve --port 8080 --page ./pages/form.html
//! ```
//!
//! ## Cliente
//! ```bash
//! ./http_exchange fetch --host example.org --port 80 --target /
//! HTTP_PORT=8080 ./http_exchange fetch --target /form.html
//! ```

use clap::{Args, Parser, Subcommand};

/// Cliente y servidor HTTP/1.x minimalistas
#[derive(Debug, Parser)]
#[command(name = "http_exchange")]
#[command(about = "Cliente y servidor HTTP/1.x con framing de mensajes implementado desde cero")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Modo de operación
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inicia el servidor HTTP
    Serve(ServeConfig),

    /// Envía un request HTTP y muestra la respuesta
    Fetch(FetchConfig),
}

/// Configuración del servidor
#[derive(Debug, Clone, Args)]
pub struct ServeConfig {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Archivo HTML que se entrega como página en cada GET
    #[arg(long, default_value = "./pages/form.html", env = "PAGE_PATH")]
    pub page: String,
}

impl ServeConfig {
    /// Dirección completa para el bind (host:port)
    ///
    /// # Ejemplo
    /// ```
    /// use http_exchange::config::ServeConfig;
    ///
    /// let config = ServeConfig::default();
    /// assert_eq!(config.address(), "127.0.0.1:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración antes de arrancar
    pub fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Host must not be empty".to_string());
        }
        if self.page.is_empty() {
            return Err("Page path must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            page: "./pages/form.html".to_string(),
        }
    }
}

/// Configuración del cliente
#[derive(Debug, Clone, Args)]
pub struct FetchConfig {
    /// Host remoto al que conectarse
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Puerto remoto
    #[arg(short, long, default_value = "80", env = "HTTP_PORT")]
    pub port: u16,

    /// Request-target a pedir
    #[arg(long, default_value = "/")]
    pub target: String,

    /// Body a enviar; si está presente el request es un POST con
    /// Content-Length, si no es un GET sin body
    #[arg(long)]
    pub body: Option<String>,
}

impl FetchConfig {
    /// Dirección remota (host:port)
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración antes de conectar
    pub fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Host must not be empty".to_string());
        }
        if self.target.is_empty() {
            return Err("Target must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 80,
            target: "/".to_string(),
            body: None,
        }
    }
}
