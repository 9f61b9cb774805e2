//! # Alta Voz — Generador de Pautas
//!
//! An interactive terminal wizard that collects podcast-episode metadata,
//! asks the Gemini generation service for a structured conversation
//! outline (*pauta*), and exports the result.
//!
//! ## Features
//!
//! - Two-stage form: host/guest identity first, episode topics second
//! - One generation call per submission, with manual retry on failure
//! - Parsed outline rendered in the terminal as titled, bulleted sections
//! - Exports: paginated PDF, JSON document, clipboard-ready plain text
//!
//! ## Usage
//!
//! ```sh
//! GEMINI_API_KEY=... altavoz_pauta -o ./pautas
//! ```
//!
//! ## Architecture
//!
//! The wizard is an explicit state machine (see [`wizard`]): the driver
//! below renders whichever phase the session is in and feeds events back.
//! Exactly one phase is active at a time — form, loading, error panel or
//! result panel — and the only suspending operation is the generation
//! call itself.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::io::Write as _;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod api;
mod cli;
mod config;
mod models;
mod outputs;
mod parser;
mod prompt;
mod utils;
mod wizard;

use api::GeminiClient;
use cli::Cli;
use config::{load_config, FileConfig, GeminiConfig};
use models::{Section, Specialization};
use outputs::{json, pdf, text};
use parser::parse_outline;
use utils::{ensure_writable_dir, truncate_for_log};
use wizard::{run_generation, Event, Phase, Session};

type InputLines = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("altavoz_pauta starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.output_dir, ?args.config, "Parsed CLI arguments");

    // --- Resolve configuration; a missing credential never gets past here ---
    let file_config = match args.config.as_deref() {
        Some(path) => load_config(path).await?,
        None => FileConfig::default(),
    };
    let gemini_config = GeminiConfig::resolve(
        args.api_key.clone(),
        args.model.clone(),
        args.base_url.clone(),
        &file_config,
    )?;
    let client = GeminiClient::new(gemini_config);
    info!(model = %client.model(), "Generator configured");

    // Early check: ensure the output dir is writable before the user types anything
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    println!("ALTA VOZ — Un Podcast de la Escuela de Diseño");
    println!("Completa los datos del episodio para generar su pauta de conversación.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut session = Session::new();

    loop {
        match session.phase.clone() {
            Phase::Idle => {
                session = session.apply(Event::Begin);
            }
            Phase::Stage1 => {
                println!();
                session.form.host_name = read_field(&mut lines, "Tu nombre").await?;
                session.form.host_role = read_field(&mut lines, "Tu pega (departamento o rol)").await?;
                session.form.guest_name = read_field(&mut lines, "Nombre del invitado/a").await?;
                session.form.guest_hit = read_field(&mut lines, "¿Cuál es su HIT?").await?;
                session.form.specialization = Some(read_specialization(&mut lines).await?);
                session = session.apply(Event::AdvanceToTopics);
            }
            Phase::Stage2 => {
                println!("\nDefine los temas del programa:");
                if session.form.episode_title.is_empty() {
                    session.form.episode_title =
                        read_field(&mut lines, "Título del episodio").await?;
                    session.form.section1 = read_field(&mut lines, "Sección 1").await?;
                    session.form.section2 = read_field(&mut lines, "Sección 2").await?;
                    session.form.section3 = read_field(&mut lines, "Sección 3").await?;
                } else {
                    // Arrived via retry: fields retained, just confirm or edit.
                    println!(
                        "  Título: {} | Secciones: {}, {}, {}",
                        session.form.episode_title,
                        session.form.section1,
                        session.form.section2,
                        session.form.section3
                    );
                    let choice = read_choice(
                        &mut lines,
                        "¿[e]nviar de nuevo o [c]ambiar los temas?",
                        &["e", "c"],
                    )
                    .await?;
                    if choice == "c" {
                        session.form.episode_title =
                            read_field(&mut lines, "Título del episodio").await?;
                        session.form.section1 = read_field(&mut lines, "Sección 1").await?;
                        session.form.section2 = read_field(&mut lines, "Sección 2").await?;
                        session.form.section3 = read_field(&mut lines, "Sección 3").await?;
                    }
                }
                session = session.apply(Event::Submit);
            }
            Phase::Pending => {
                println!("\nGenerando la pauta… esto puede tardar unos segundos.");
                session = run_generation(session, &client).await;
            }
            Phase::Failed(message) => {
                println!("\nAlgo salió mal...");
                println!("{message}");
                let choice = read_choice(
                    &mut lines,
                    "¿Qué quieres hacer? [r]eintentar / [n]uevo episodio / [s]alir",
                    &["r", "n", "s"],
                )
                .await?;
                session = match choice.as_str() {
                    "r" => session.apply(Event::Retry),
                    "n" => session.apply(Event::Reset),
                    _ => break,
                };
            }
            Phase::Completed(raw) => {
                // Sections are derived from the raw text on every render.
                let sections = parse_outline(&raw);
                if sections.is_empty() {
                    warn!(
                        preview = %truncate_for_log(&raw, 200),
                        "Outline has no recognizable sections; showing raw text"
                    );
                }
                render_result(&session.form.episode_title, &raw, &sections);

                let stay = result_actions(&mut lines, &mut session, &raw, &args.output_dir).await?;
                if !stay {
                    break;
                }
            }
        }
    }

    info!("altavoz_pauta exiting");
    println!("\n¡Hasta el próximo episodio!");
    Ok(())
}

/// Render the result panel: quoted title, subtitle, parsed sections.
fn render_result(episode_title: &str, raw: &str, sections: &[Section]) {
    println!("\n\"{episode_title}\"");
    println!("Una pauta para encender la conversación.\n");
    if sections.is_empty() {
        println!("{}", text::to_plain_text(raw));
    } else {
        println!("{}", text::render_sections(sections));
    }
}

/// Offer the result actions until the user starts over or leaves.
///
/// Returns `false` when the wizard should exit. Export failures are
/// reported and swallowed here: a failed PDF or JSON write logs an error
/// and keeps the menu open, a failed clipboard copy alerts synchronously.
async fn result_actions(
    lines: &mut InputLines,
    session: &mut Session,
    raw: &str,
    output_dir: &str,
) -> Result<bool, Box<dyn Error>> {
    loop {
        let choice = read_choice(
            lines,
            "¿Qué quieres hacer? [g]uardar PDF / guardar [j]son / [c]opiar texto / [n]uevo episodio / [s]alir",
            &["g", "j", "c", "n", "s"],
        )
        .await?;

        match choice.as_str() {
            "g" => {
                let sections = parse_outline(raw);
                match pdf::write_outline_pdf(&session.form.episode_title, &sections, output_dir) {
                    Ok(path) => println!("PDF guardado en {path}"),
                    Err(e) => {
                        error!(error = %e, "Failed to write PDF");
                        println!("No se pudo generar el PDF; revisa el log.");
                    }
                }
            }
            "j" => {
                let Some(episode) = session.form.freeze() else {
                    // Completed sessions always freeze; stay defensive anyway.
                    println!("No se pudo armar el documento JSON.");
                    continue;
                };
                let document = models::OutlineDocument {
                    generated_on: Local::now().date_naive().to_string(),
                    episode,
                    sections: parse_outline(raw),
                    raw_outline: raw.to_string(),
                };
                match json::write_outline_json(&document, output_dir).await {
                    Ok(path) => println!("JSON guardado en {path}"),
                    Err(e) => {
                        error!(error = %e, "Failed to write JSON");
                        println!("No se pudo guardar el JSON; revisa el log.");
                    }
                }
            }
            "c" => match text::copy_outline(raw) {
                Ok(()) => println!("¡Copiado!"),
                Err(e) => {
                    warn!(error = %e, "Clipboard copy failed");
                    println!("No se pudo copiar el texto.");
                }
            },
            "n" => {
                *session = std::mem::take(session).apply(Event::Reset);
                return Ok(true);
            }
            _ => return Ok(false),
        }
    }
}

/// Prompt for a single non-empty field, re-asking on empty input.
async fn read_field(lines: &mut InputLines, label: &str) -> Result<String, Box<dyn Error>> {
    loop {
        print!("{label}: ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            return Err("la entrada se cerró antes de completar el formulario".into());
        };
        let value = line.trim().to_string();
        if !value.is_empty() {
            return Ok(value);
        }
        println!("El campo no puede quedar vacío.");
    }
}

/// Prompt for one of a fixed set of single-letter choices.
async fn read_choice(
    lines: &mut InputLines,
    label: &str,
    allowed: &[&str],
) -> Result<String, Box<dyn Error>> {
    loop {
        print!("{label} ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            return Err("la entrada se cerró antes de elegir una opción".into());
        };
        let value = line.trim().to_lowercase();
        if allowed.contains(&value.as_str()) {
            return Ok(value);
        }
        println!("Opción inválida.");
    }
}

/// Numbered specialization menu; enter accepts the default.
async fn read_specialization(lines: &mut InputLines) -> Result<Specialization, Box<dyn Error>> {
    println!("Especialidad del invitado/a:");
    for (i, discipline) in Specialization::ALL.iter().enumerate() {
        println!("  {}. {}", i + 1, discipline.label());
    }
    loop {
        print!("Elige una opción [1-{}, enter = 1]: ", Specialization::ALL.len());
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            return Err("la entrada se cerró antes de elegir la especialidad".into());
        };
        let value = line.trim().to_string();
        if value.is_empty() {
            return Ok(Specialization::Grafico);
        }
        match value.parse::<usize>() {
            Ok(n) if (1..=Specialization::ALL.len()).contains(&n) => {
                return Ok(Specialization::ALL[n - 1]);
            }
            _ => println!("Opción inválida."),
        }
    }
}
