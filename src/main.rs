//! Application entry point — food-waste assistant CLI.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Build the [`Assistant`] from config — fatal when no provider
//!    credential resolves.
//! 5. Run the line-oriented command loop until `quit`.

use std::io::{BufRead, Write};

use anyhow::Context;

use wastenot::assistant::{
    Assistant, ChatTurn, ConversationLog, Coordinates, GroundedAnswer, ImageInput, OpState, Role,
};
use wastenot::audio::{play, Microphone, Recorder};
use wastenot::config::AppConfig;

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("wastenot starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Tokio runtime (2 workers — provider calls are the only async work)
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    // 4. Assistant — absence of a credential is a fatal startup condition
    let assistant = Assistant::from_config(&config.provider)
        .context("cannot start without a provider credential")?;

    // 5. Command loop
    print_help();
    run(&rt, &assistant, &config)
}

fn print_help() {
    println!("commands:");
    println!("  analyze <image-path> <prompt…>   recipe ideas from a photo");
    println!("  chat <message…>                  talk to the assistant");
    println!("  plan <constraints…>              multi-day meal plan");
    println!("  facts <question…>                grounded food-waste facts");
    println!("  nearby <lat> <lon>               food banks / compost / fridges");
    println!("  record                           capture a voice note, transcribe it");
    println!("  say [text…]                      speak text (default: last transcript)");
    println!("  quit");
}

fn run(rt: &tokio::runtime::Runtime, assistant: &Assistant, config: &AppConfig) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut conversation = ConversationLog::new();
    let mut last_transcript: Option<String> = None;

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(()); // EOF
        }
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "help" => print_help(),
            "quit" | "exit" => return Ok(()),

            "analyze" => {
                let Some((path, prompt)) = rest.split_once(char::is_whitespace) else {
                    println!("usage: analyze <image-path> <prompt…>");
                    continue;
                };
                match ImageInput::from_path(std::path::Path::new(path)) {
                    Ok(image) => {
                        let slot = dispatch(rt.block_on(assistant.analyze_visual(&image, prompt)));
                        render_text(&slot);
                    }
                    Err(e) => println!("cannot read {path}: {e}"),
                }
            }

            "chat" => {
                let slot = dispatch(rt.block_on(assistant.converse(&conversation, rest)));
                render_text(&slot);
                // The exchange joins the history only after a successful reply.
                if let Some(reply) = slot.value() {
                    conversation.append(ChatTurn::new(Role::User, rest));
                    conversation.append(ChatTurn::new(Role::Model, reply.clone()));
                }
            }

            "plan" => {
                let slot = dispatch(rt.block_on(assistant.plan_meals(rest)));
                render_text(&slot);
            }

            "facts" => {
                let slot = dispatch(rt.block_on(assistant.search_facts(rest)));
                render_grounded(&slot);
            }

            "nearby" => {
                let mut args = rest.split_whitespace();
                let coords = match (
                    args.next().and_then(|s| s.parse::<f64>().ok()),
                    args.next().and_then(|s| s.parse::<f64>().ok()),
                ) {
                    (Some(latitude), Some(longitude)) => Coordinates {
                        latitude,
                        longitude,
                    },
                    _ => {
                        println!("usage: nearby <lat> <lon>");
                        continue;
                    }
                };
                let slot = dispatch(rt.block_on(assistant.find_nearby(coords)));
                render_grounded(&slot);
            }

            "record" => match record_and_transcribe(rt, assistant, config, &stdin) {
                Ok(Some(transcript)) => {
                    println!("{transcript}");
                    last_transcript = Some(transcript);
                }
                Ok(None) => {}
                Err(e) => println!("error: {e}"),
            },

            "say" => {
                let text = if rest.is_empty() {
                    match &last_transcript {
                        Some(t) => t.clone(),
                        None => {
                            println!("nothing to say yet — record a note or pass text");
                            continue;
                        }
                    }
                } else {
                    rest.to_string()
                };
                match rt.block_on(assistant.synthesize_speech(&text)) {
                    Ok(Some(buffer)) => {
                        let secs = buffer.duration_secs();
                        match play(&buffer) {
                            // The handle owns the output stream; keep it
                            // alive until the clip ends.
                            Ok(handle) => {
                                std::thread::sleep(std::time::Duration::from_secs_f32(secs + 0.2));
                                drop(handle);
                            }
                            Err(e) => println!("playback failed: {e}"),
                        }
                    }
                    Ok(None) => println!("(the provider returned no audio)"),
                    Err(e) => println!("error: {e}"),
                }
            }

            other => println!("unknown command: {other} (try `help`)"),
        }
    }
}

/// Fold one operation's outcome into its result slot.
fn dispatch<T>(result: Result<T, wastenot::assistant::AssistantError>) -> OpState<T> {
    OpState::from_result(result)
}

fn render_text(slot: &OpState<String>) {
    match slot {
        OpState::Success(text) => println!("{text}"),
        OpState::Failed(message) => println!("error: {message}"),
        _ => {}
    }
}

fn render_grounded(slot: &OpState<GroundedAnswer>) {
    match slot {
        OpState::Success(answer) => {
            println!("{}", answer.text);
            if !answer.citations.is_empty() {
                println!("sources:");
                for citation in &answer.citations {
                    println!("  {} — {}", citation.title(), citation.uri());
                }
            }
        }
        OpState::Failed(message) => println!("error: {message}"),
        _ => {}
    }
}

/// One capture cycle: start, wait for Enter, stop, transcribe.
///
/// The microphone is released by `stop` before the upload begins, so a
/// failed transcription never leaves the device claimed.
fn record_and_transcribe(
    rt: &tokio::runtime::Runtime,
    assistant: &Assistant,
    config: &AppConfig,
    stdin: &std::io::Stdin,
) -> anyhow::Result<Option<String>> {
    let mic = Microphone::new()?;
    let mut recorder = Recorder::new(mic);
    recorder.start()?;

    println!("recording… press Enter to stop");
    let mut sink = String::new();
    stdin.lock().read_line(&mut sink)?;

    let recording = recorder.stop()?;

    if recording.duration_secs < config.audio.min_recording_secs {
        println!(
            "recording too short ({:.2} s, need at least {:.1} s)",
            recording.duration_secs, config.audio.min_recording_secs
        );
        return Ok(None);
    }
    if recording.duration_secs > config.audio.max_recording_secs {
        log::warn!(
            "recording is {:.0} s long; the upload may be slow",
            recording.duration_secs
        );
    }

    println!("transcribing…");
    Ok(Some(rt.block_on(assistant.transcribe(recording))?))
}
