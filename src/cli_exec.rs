use anyhow::{Context, Result};
use time::OffsetDateTime;

use bites::chat::ChatSession;
use bites::config::ApiConfig;
use bites::eats::EatsView;
use bites::fallback;
use bites::feed::{FeedView, POST_TAGS, time_label};
use bites::model::Recipe;
use bites::project::Chip;
use bites::remote::RemoteClient;
use bites::sync::{FallbackPolicy, LoadState, Loaded};

use crate::cli_subcommands::Commands;

pub(crate) async fn handle_command(api: ApiConfig, command: Commands) -> Result<()> {
    let client = RemoteClient::new(&api)?;

    match command {
        Commands::Eats { query, chips, json } => {
            let mut view = EatsView::new();
            if let Some(q) = query {
                view.criteria.query = q;
            }
            for label in chips {
                let chip = Chip::from_label(&label).with_context(|| {
                    format!(
                        "unknown chip {:?} (available: {})",
                        label,
                        Chip::ALL.map(Chip::label).join(", ")
                    )
                })?;
                view.criteria.active.insert(chip);
            }

            let epoch = view.list.begin_load();
            view.list
                .resolve(epoch, client.restaurants().await, fallback::sample_restaurants);

            if view.list.state() == LoadState::Unavailable
                && let Some(cause) = view.list.last_error()
            {
                eprintln!("restaurants unavailable ({})", cause);
            }

            let visible = view.visible();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&visible).context("serialize eats json")?
                );
            } else if visible.is_empty() {
                println!("No eateries match.");
            } else {
                for r in visible {
                    let rating = r
                        .rating
                        .map(|v| format!("{:.1}", v))
                        .unwrap_or_else(|| "N/A".to_string());
                    let dist = r.distance_text.unwrap_or_else(|| "?".to_string());
                    let eta = r.duration_text.unwrap_or_else(|| "?".to_string());
                    println!("{}  ({} stars, {}, {})", r.name, rating, dist, eta);
                    println!("    {}", r.address.unwrap_or_else(|| "Address not marked".to_string()));
                }
            }
        }

        Commands::Feed { json } => {
            let mut feed = FeedView::new();
            let epoch = feed.posts.begin_load();
            feed.posts
                .resolve(epoch, client.community_posts().await, fallback::sample_posts);

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(feed.posts.items())
                        .context("serialize feed json")?
                );
            } else {
                let now = OffsetDateTime::now_utc();
                for post in feed.posts.items() {
                    println!(
                        "[{:>3}] {}  — {} · {} · {}",
                        post.votes,
                        post.text,
                        post.author,
                        time_label(post, now),
                        post.tag
                    );
                }
            }
        }

        Commands::Post { text, tag } => {
            let mut feed = FeedView::new();
            if !feed.select_tag(&tag) {
                anyhow::bail!("unknown tag {:?} (available: {})", tag, POST_TAGS.join(", "));
            }
            feed.set_draft(text);
            // Whitespace-only drafts are a silent no-op, mirroring the views.
            let Some(draft) = feed.begin_submit() else {
                return Ok(());
            };
            match client.create_post(&draft).await {
                Ok(post) => {
                    println!("Posted {}", post.id);
                }
                Err(err) => {
                    feed.submit_failed(&err);
                    anyhow::bail!("post failed: {}", err.cause());
                }
            }
        }

        Commands::Recipes { json } => {
            let mut recipes: Loaded<Recipe> =
                Loaded::new("recipes", FallbackPolicy::OnFailureOrEmpty);
            let epoch = recipes.begin_load();
            recipes.resolve(epoch, client.recipes().await, fallback::sample_recipes);

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(recipes.items())
                        .context("serialize recipes json")?
                );
            } else {
                for recipe in recipes.items() {
                    println!("{}", recipe.title);
                }
            }
        }

        Commands::Chat { message } => {
            let mut session = ChatSession::new();
            session.set_input(message);
            let Some(outbound) = session.begin_submit() else {
                return Ok(());
            };
            let outcome = client.chat(&outbound.message, &outbound.history).await;
            session.complete(outcome);
            if let Some(turn) = session.turns().last() {
                println!("{}", turn.text);
            }
        }
    }

    Ok(())
}
