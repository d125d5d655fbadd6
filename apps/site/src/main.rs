use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings,
    render::{self, Section},
    ResourceFilter, SiteSession, SubmitOutcome,
};
use shared::{content, domain::ContactField};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tutor-site", about = "Tutor marketing site from the terminal")]
struct Cli {
    /// Backend origin, e.g. https://tutor.example.com. Overrides site.toml and env.
    #[arg(long, global = true)]
    backend_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load testimonials and resources and print the page content.
    Show {
        #[arg(long, default_value = "all")]
        filter: ResourceFilter,
    },
    /// Send the contact form once.
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (mut settings, config_warnings) = load_settings();
    if let Some(url) = cli.backend_url {
        settings.backend_url = Some(url);
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    for message in config_warnings {
        warn!("{message}");
    }

    let session = SiteSession::new(&settings);
    match cli.command {
        Command::Show { filter } => show(&session, filter).await,
        Command::Contact {
            name,
            email,
            phone,
            message,
        } => {
            let form = &session.contact;
            form.update_field(ContactField::Name, name);
            form.update_field(ContactField::Email, email);
            form.update_field(ContactField::Phone, phone);
            form.update_field(ContactField::Message, message);
            contact(&session).await
        }
    }
}

async fn show(session: &SiteSession, filter: ResourceFilter) -> Result<()> {
    if let Some(loads) = session.mount() {
        loads.join().await;
    }

    println!("{} | {}", content::BRAND, content::TAGLINE);
    for stat in content::STATS {
        println!("  {} {}", stat.value, stat.label);
    }

    println!("\nMa Méthode d'Enseignement");
    for (index, step) in content::METHOD_STEPS.iter().enumerate() {
        println!("  {}. {}: {}", index + 1, step.title, step.description);
    }

    println!("\nFormules & Tarifs");
    for plan in content::PRICING_PLANS {
        let badge = if plan.popular { " [Populaire]" } else { "" };
        println!("  {}{} | {} {}", plan.title, badge, plan.price, plan.duration);
        for feature in plan.features {
            println!("    - {feature}");
        }
    }

    let testimonials = session.store.testimonials().await;
    debug!(status = ?testimonials.status, "testimonials section");
    println!("\nCe que disent mes élèves");
    match render::testimonials_section(&testimonials.items) {
        Section::Cards(cards) => {
            for card in cards {
                println!("  {} {} ({})", card.stars, card.name, card.role);
                println!("    {}", card.content);
            }
        }
        Section::Empty(message) => println!("  {message}"),
    }

    let view = session.resource_view().await;
    let resources_status = session.store.resources().await.status;
    debug!(status = ?resources_status, "resources section");
    println!("\nCours & Ressources: {}", render::tab_label(filter));
    match render::resources_section(&view, filter) {
        Section::Cards(cards) => {
            for card in cards {
                println!("  {} | {}", card.title, card.subtitle);
                println!("    {}", card.description);
                println!("    {}: {}", card.action, card.url);
            }
        }
        Section::Empty(message) => println!("  {message}"),
    }
    Ok(())
}

async fn contact(session: &SiteSession) -> Result<()> {
    let button = render::submit_button(session.contact.status());
    println!("{}", button.label);

    let outcome = session.contact.submit().await;
    for notification in session.notifications.active() {
        println!("{}\n  {}", notification.title, notification.detail);
    }

    match outcome {
        SubmitOutcome::Delivered(_) => Ok(()),
        SubmitOutcome::Failed(_) => {
            for channel in content::CONTACT_CHANNELS {
                println!("  {}: {}", channel.label, channel.value);
            }
            bail!("contact message was not delivered")
        }
        SubmitOutcome::Incomplete(missing) => {
            let names: Vec<_> = missing.iter().map(|field| field.as_str()).collect();
            bail!("required fields are empty: {}", names.join(", "))
        }
        SubmitOutcome::AlreadySubmitting => bail!("a submission is already in flight"),
    }
}
