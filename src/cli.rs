use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;

#[allow(clippy::large_enum_variant)]
pub(crate) enum RunOutcome {
    Serve(pushbox::config::AppConfig, SocketAddr),
    Exit(i32),
}

pub(crate) fn run() -> RunOutcome {
    let cli = Cli::parse();
    if let Some(Command::Init(args)) = cli.command {
        let code = run_init(args);
        return RunOutcome::Exit(code);
    }

    RunOutcome::Serve(
        pushbox::config::AppConfig {
            app_name: cli.app_name,
            vapid_private_key: cli.vapid_private_key,
            vapid_public_key: cli.vapid_public_key,
            vapid_subject: cli.vapid_subject,
        },
        cli.listen,
    )
}

#[derive(Parser, Debug)]
#[command(
    name = "pushbox",
    version,
    about = "Web push subscription relay server"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    #[arg(long, default_value = "127.0.0.1:3000")]
    listen: SocketAddr,
    #[arg(long, default_value = "Pushbox")]
    app_name: String,
    #[arg(long, env = "PUSHBOX_VAPID_PRIVATE_KEY")]
    vapid_private_key: Option<String>,
    #[arg(long, env = "PUSHBOX_VAPID_PUBLIC_KEY")]
    vapid_public_key: Option<String>,
    #[arg(long, env = "PUSHBOX_VAPID_SUBJECT")]
    vapid_subject: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a fresh VAPID key pair and print it as configuration.
    Init(InitArgs),
}

#[derive(Args, Debug)]
struct InitArgs {
    #[arg(long)]
    subject: Option<String>,
}

fn run_init(args: InitArgs) -> i32 {
    let credentials = match pushbox::generate_vapid_credentials() {
        Ok(credentials) => credentials,
        Err(err) => {
            eprintln!("failed to generate VAPID credentials: {err}");
            return 1;
        }
    };
    let (subject, show_subject_note) = match args.subject {
        Some(subject) => (subject, false),
        None => ("mailto:you@example.com".to_string(), true),
    };

    println!("VAPID credentials generated.");
    println!();
    println!("PUSHBOX_VAPID_PRIVATE_KEY=\"{}\"", credentials.private_key);
    println!("PUSHBOX_VAPID_PUBLIC_KEY=\"{}\"", credentials.public_key);
    println!("PUSHBOX_VAPID_SUBJECT=\"{subject}\"");
    if show_subject_note {
        println!();
        println!("Note: replace PUSHBOX_VAPID_SUBJECT with a contact URI you control.");
    }
    println!();
    println!(
        "--vapid-private-key \"{}\" --vapid-public-key \"{}\" --vapid-subject \"{subject}\"",
        credentials.private_key, credentials.public_key
    );
    0
}
