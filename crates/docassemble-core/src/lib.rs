//! Docassemble Core - typed async client for the Docassemble REST API.
//!
//! This crate wraps the server's administration and interview API: users,
//! privileges, interview sessions, the playground, packages, server
//! configuration, API keys, template fields and data stashing. It has no
//! knowledge of MCP; the `docassemble-mcp` binary builds its tool layer on
//! top of it.
//!
//! # Example
//!
//! ```rust,ignore
//! use docassemble_core::{ClientConfig, DocassembleClient, StartInterview};
//!
//! #[tokio::main]
//! async fn main() -> docassemble_core::Result<()> {
//!     let config = ClientConfig::from_env()?;
//!     let client = DocassembleClient::connect(config).await?;
//!
//!     let me = client.get_current_user().await?;
//!     println!("Connected as {}", me["email"]);
//!
//!     let session = client
//!         .start_interview(&StartInterview::new("docassemble.demo:data/questions/questions.yml"))
//!         .await?;
//!     println!("New session: {}", session["session"]);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod features;
pub mod http;

pub use client::{
    ApiKeyFilter, CreateApiKey, CreateUser, DocassembleClient, ExtractTemplateFields, GoBack,
    InstallPackage, InstallPlaygroundPackages, InterviewAction, InviteUsers, ListUsers, LoginUrl,
    PackageInstall, PlaygroundFiles, PlaygroundProject, PullPackage, RedirectUrl, ResumeUrl,
    RetrieveStash, SessionFilter, SessionListing, SessionRef, SetInterviewVariables,
    StartInterview, StashData, StringOrList, UninstallPackage, UpdateApiKey,
    UploadPlaygroundFiles, UserProfile, CLIENT_VERSION,
};
pub use config::{ClientConfig, EnvVars, NetworkConfig, SessionConfig};
pub use error::{DocassembleError, Result};
pub use features::FeatureSupport;
pub use http::{ApiPayload, ApiRequest, Params, RequestBody, Upload};
