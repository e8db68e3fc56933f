use colored::Colorize;

pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), err);

    let msg = format!("{err:#}").to_lowercase();

    if msg.contains("login first") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Log in with one of:");
        eprintln!(
            "  {} compliance login https://compliance.example.com --user <user> --password <password>",
            "$".dimmed()
        );
        eprintln!(
            "  {} compliance login-automate https://automate.example.com --user <user> --ent <ent> --dctoken <token>",
            "$".dimmed()
        );
    }

    if msg.starts_with("missing --") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  See the accepted credential options with:");
        eprintln!("  {} compliance login --help", "$".dimmed());
    }

    if msg.contains("certificate") || msg.contains("tls") || msg.contains("ssl") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  For servers with self-signed certificates, log in again with --insecure.");
    }

    if msg.contains("connection refused") || msg.contains("error sending request") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Check the server URL and that the server is reachable.");
    }

    std::process::exit(1);
}
