pub mod check;
pub mod new;
pub mod related;

use anyhow::Result;

use crate::cli::{Cli, Commands};

/// Run a subcommand. `Ok(false)` means it completed but found problems.
pub fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Check { dir, format } => check::run(&dir, format),
        Commands::Related {
            dir,
            slug,
            limit,
            positive_only,
        } => related::run(&dir, &slug, limit, positive_only).map(|_| true),
        Commands::New {
            dir,
            slug,
            title,
            author,
            category,
            tags,
            description,
            date,
            featured,
        } => new::run(
            &dir,
            new::NewPost {
                slug,
                title,
                author,
                category,
                tags,
                description,
                date,
                featured,
            },
        )
        .map(|path| {
            println!("Created {}", path.display());
            true
        }),
    }
}
