//! Table sinks for cdaflat.
//!
//! - [`database`] - Sink trait, load summary and factory
//! - [`postgresql`] - PostgreSQL sink and SQL statement synthesis
//! - [`script`] - SQL script sink
//!
//! # Design Pattern
//!
//! Sinks sit behind the [`database::TableSink`] trait so the `load` command
//! does not depend on the destination. Both sinks share the statements built
//! in [`postgresql::statements`].
//!
//! ```rust,no_run
//! use cdaflat::adapters::database::create_table_sink;
//! use cdaflat::config::load_config;
//! use cdaflat::core::frame::TableFrame;
//!
//! # async fn example(frames: Vec<TableFrame>) -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("cdaflat.toml")?;
//! let sink = create_table_sink(&config)?;
//! let summary = sink.load_frames(&frames, false).await?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod postgresql;
pub mod script;
