//! Terminal front end for the summarizer wizard.
//!
//! Lines starting with `:` are commands; anything else is input for the
//! current step (transcript text, instruction text, or summary text after
//! `:edit`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use summarizer::wizard::client::HttpBackend;
use summarizer::wizard::{
    Notification, NotificationKind, Step, Wizard, WizardError, PRESET_INSTRUCTIONS,
};

#[derive(Debug, Parser)]
#[command(name = "summarizer-wizard", about = "Summarize a meeting transcript step by step")]
struct Args {
    /// Base URL of the summarizer API
    #[arg(long, env = "SUMMARIZER_BACKEND_URL", default_value = "http://localhost:3001")]
    backend_url: String,

    /// Start with this file uploaded as the transcript
    #[arg(long)]
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut wizard = Wizard::new(HttpBackend::new(args.backend_url));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if let Some(path) = args.file {
        upload(&mut wizard, &path.to_string_lossy()).await?;
    }

    print_step_help(wizard.step());
    while let Some(line) = lines.next_line().await? {
        let (command, rest) = split_command(&line);
        let outcome = match command {
            Some("quit") | Some("q") => break,
            Some("help") => {
                print_step_help(wizard.step());
                Ok(())
            }
            Some("back") => wizard.back().map(|_| print_step_help(wizard.step())),
            Some(cmd) => run_command(&mut wizard, &mut lines, cmd, rest).await,
            None => {
                accept_text(&mut wizard, &line);
                Ok(())
            }
        };
        if let Err(e) = outcome {
            eprintln!("! {e}");
        }
    }
    Ok(())
}

fn split_command(line: &str) -> (Option<&str>, &str) {
    match line.trim().strip_prefix(':') {
        Some(rest) => {
            let (cmd, arg) = rest.split_once(' ').unwrap_or((rest, ""));
            (Some(cmd), arg.trim())
        }
        None => (None, line),
    }
}

fn accept_text(wizard: &mut Wizard<HttpBackend>, line: &str) {
    match wizard.step() {
        Step::Upload => {
            let mut transcript = wizard.transcript().to_string();
            if !transcript.is_empty() {
                transcript.push('\n');
            }
            transcript.push_str(line);
            wizard.set_transcript(transcript);
        }
        Step::Instruction => wizard.set_instruction(line),
        Step::Summary => println!("(use :edit to change the summary, :help for commands)"),
    }
}

async fn run_command(
    wizard: &mut Wizard<HttpBackend>,
    lines: &mut Lines<BufReader<Stdin>>,
    command: &str,
    arg: &str,
) -> Result<(), WizardError> {
    match (wizard.step(), command) {
        (Step::Upload, "file") => {
            if let Err(e) = upload(wizard, arg).await {
                eprintln!("! {e:#}");
            }
        }
        (Step::Upload, "clear") => wizard.set_transcript(""),
        (Step::Upload, "next") => {
            wizard.continue_to_instruction()?;
            print_step_help(wizard.step());
        }
        (Step::Instruction, "preset") => {
            match arg.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
                Some(index) => {
                    wizard.apply_preset(index)?;
                    println!("Instruction: {}", wizard.instruction());
                }
                None => println!("usage: :preset <1-{}>", PRESET_INSTRUCTIONS.len()),
            }
        }
        (Step::Instruction, "generate") => {
            println!("Generating...");
            wizard.generate().await?;
            print_summary(wizard);
            print_step_help(wizard.step());
        }
        (Step::Summary, "show") => print_summary(wizard),
        (Step::Summary, "preview") => println!("{}", wizard.preview_html()),
        (Step::Summary, "edit") => {
            println!("Enter the new summary; finish with a line containing only '.'");
            let mut text = String::new();
            while let Ok(Some(line)) = lines.next_line().await {
                if line == "." {
                    break;
                }
                text.push_str(&line);
                text.push('\n');
            }
            wizard.set_summary(text);
        }
        (Step::Summary, "copy") => {
            let (text, toast) = wizard.copy_summary();
            println!("{text}");
            show(&toast);
        }
        (Step::Summary, "add") => {
            if let Some(toast) = wizard.add_recipients(arg) {
                show(&toast);
            }
            println!("Recipients ({}): {}", wizard.recipients().len(), wizard.recipients().join(", "));
        }
        (Step::Summary, "rm") => {
            if !wizard.remove_recipient(arg) {
                println!("{arg} is not a recipient");
            }
        }
        (Step::Summary, "send") => {
            println!("Sending...");
            let toast = wizard.send().await?;
            show(&toast);
        }
        (step, other) => println!("Unknown command ':{other}' on the {step:?} step (try :help)"),
    }
    Ok(())
}

async fn upload(wizard: &mut Wizard<HttpBackend>, path: &str) -> Result<()> {
    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {path}"))?;
    let file_name = PathBuf::from(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());

    println!("Extracting text from file...");
    wizard.upload_file(&file_name, content).await?;
    match wizard.upload_error() {
        Some(error) => eprintln!("! {error}"),
        None => println!("Transcript ({} chars):\n{}", wizard.transcript().len(), wizard.transcript()),
    }
    Ok(())
}

fn print_summary(wizard: &Wizard<HttpBackend>) {
    println!("──── summary ────\n{}\n─────────────────", wizard.summary());
}

fn show(toast: &Notification) {
    let marker = match toast.kind {
        NotificationKind::Success => "✓",
        NotificationKind::Error => "!",
    };
    println!("{marker} {}: {}", toast.title, toast.description);
}

fn print_step_help(step: Step) {
    match step {
        Step::Upload => {
            println!("[1/3] Upload transcript: type or paste text, or :file <path> (.txt .pdf .jpg .jpeg)");
            println!("      :clear  :next  :quit");
        }
        Step::Instruction => {
            println!("[2/3] AI instructions: type an instruction or pick a preset with :preset <n>");
            for (i, preset) in PRESET_INSTRUCTIONS.iter().enumerate() {
                println!("      {}. {preset}", i + 1);
            }
            println!("      :generate  :back  :quit");
        }
        Step::Summary => {
            println!("[3/3] Review & share:");
            println!("      :show  :preview  :edit  :copy  :add <a@x.com,b@y.com>  :rm <addr>  :send  :back  :quit");
        }
    }
}
