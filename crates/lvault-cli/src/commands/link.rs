//! Link command handlers

use anyhow::{anyhow, bail, Context, Result};

use lvault_core::{browser_url, DeleteOutcome, KeyValueStore, LinkInput, LinkRecord, LinkStore};

use crate::output::Output;
use crate::prompt::{confirm, prompt_with_default, CLEAR_MARKER};

/// Field replacements given on the command line
#[derive(Debug, Clone, Default)]
pub struct EditArgs {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub tags: Option<String>,
}

impl EditArgs {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.url.is_none()
            && self.description.is_none()
            && self.tags.is_none()
    }

    /// Overlay the given fields on a form pre-filled from the current link
    fn apply_to(self, mut input: LinkInput) -> LinkInput {
        if let Some(title) = self.title {
            input.title = title;
        }
        if let Some(url) = self.url {
            input.url = url;
        }
        if let Some(description) = self.description {
            input.description = description;
        }
        if let Some(tags) = self.tags {
            input.tags = tags;
        }
        input
    }
}

/// Add a new link
pub fn add<S: KeyValueStore>(
    store: &mut LinkStore<S>,
    title: String,
    url: String,
    description: String,
    tags: String,
    output: &Output,
) -> Result<()> {
    let input = LinkInput {
        title,
        url,
        description,
        tags,
    };

    let link = store.create(&input).context("Failed to create link")?;

    output.success(&format!("Created link: {}", link.id));
    output.print_link(link);

    Ok(())
}

/// List all links
pub fn list<S: KeyValueStore>(store: &LinkStore<S>, output: &Output) -> Result<()> {
    let links = store.search("");
    output.print_links(&links, store.len(), "");
    Ok(())
}

/// Search links
pub fn search<S: KeyValueStore>(store: &LinkStore<S>, term: &str, output: &Output) -> Result<()> {
    let links = store.search(term);
    output.print_links(&links, store.len(), term);
    Ok(())
}

/// Show a single link
pub fn show<S: KeyValueStore>(store: &LinkStore<S>, id: &str, output: &Output) -> Result<()> {
    let link = find(store, resolve_id(store, id)?)?;
    output.print_link(link);
    Ok(())
}

/// Edit a link
///
/// Fields passed as flags replace the current values. Without any flags
/// each field is prompted for; Enter keeps the current value and `-`
/// clears the description or tags.
pub fn edit<S: KeyValueStore>(
    store: &mut LinkStore<S>,
    id: &str,
    args: EditArgs,
    output: &Output,
) -> Result<()> {
    let id = resolve_id(store, id)?;
    let current = LinkInput::from_record(find(store, id)?);

    let input = if args.is_empty() {
        println!("Editing link: {}", id);
        println!(
            "Press Enter to keep current value, or '{}' to clear an optional field.\n",
            CLEAR_MARKER
        );
        prompt_edits(current)?
    } else {
        args.apply_to(current)
    };

    let link = store
        .update(id, &input)
        .context("Failed to update link")?
        .ok_or_else(|| anyhow!("Link not found: {}", id))?;

    output.success("Link updated");
    output.print_link(link);

    Ok(())
}

/// Ask for each field in turn
fn prompt_edits(current: LinkInput) -> Result<LinkInput> {
    let title = prompt_with_default("Title", &current.title)?;
    let url = prompt_with_default("URL", &current.url)?;
    let description = prompt_with_default("Description", &current.description)?;
    let tags = prompt_with_default("Tags (comma-separated)", &current.tags)?;

    Ok(merge_answers(current, title, url, description, tags))
}

/// Combine prompt answers with the current values
fn merge_answers(
    current: LinkInput,
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
    tags: Option<String>,
) -> LinkInput {
    let clearable = |answer: Option<String>, current: String| match answer {
        Some(a) if a == CLEAR_MARKER => String::new(),
        Some(a) => a,
        None => current,
    };

    LinkInput {
        title: title.unwrap_or(current.title),
        url: url.unwrap_or(current.url),
        description: clearable(description, current.description),
        tags: clearable(tags, current.tags),
    }
}

/// Delete a link after confirmation
pub fn delete<S: KeyValueStore>(
    store: &mut LinkStore<S>,
    id: &str,
    yes: bool,
    output: &Output,
) -> Result<()> {
    let id = resolve_id(store, id)?;
    let mut prompt_error = None;

    let outcome = store.delete(id, |link| {
        if yes {
            return true;
        }
        // Scripted output modes never delete without --yes
        if !output.should_prompt() {
            return false;
        }
        println!("Delete link: {} - {}", link.id, link.title);
        match confirm("Are you sure you want to delete this link?") {
            Ok(answer) => answer,
            Err(e) => {
                prompt_error = Some(e);
                false
            }
        }
    });

    if let Some(e) = prompt_error {
        return Err(e.context("Failed to read confirmation"));
    }

    match outcome {
        DeleteOutcome::Deleted(link) => {
            output.success(&format!("Deleted link: {}", link.id));
            Ok(())
        }
        DeleteOutcome::Cancelled => {
            if output.should_prompt() {
                output.message("Cancelled.");
            } else {
                output.message("Not deleted. Pass --yes to delete without a prompt.");
            }
            Ok(())
        }
        DeleteOutcome::NotFound => bail!("Link not found: {}", id),
    }
}

/// Open a link in the default browser
pub fn open<S: KeyValueStore>(store: &LinkStore<S>, id: &str, output: &Output) -> Result<()> {
    let link = find(store, resolve_id(store, id)?)?;
    let url = browser_url(&link.url);

    open::that(&url).with_context(|| format!("Failed to open {}", url))?;

    output.success(&format!("Opened {}", url));
    Ok(())
}

/// Resolve a link id given in full or as a unique leading part
pub fn resolve_id<S: KeyValueStore>(store: &LinkStore<S>, id: &str) -> Result<i64> {
    let id = id.trim();
    if id.is_empty() {
        bail!("Link ID is required");
    }

    // Exact match first
    if let Ok(full) = id.parse::<i64>() {
        if store.get(full).is_some() {
            return Ok(full);
        }
    }

    let matches: Vec<_> = store
        .links()
        .iter()
        .filter(|l| l.id.to_string().starts_with(id))
        .collect();

    match matches.as_slice() {
        [] => bail!("Link not found: {}", id),
        [link] => Ok(link.id),
        _ => {
            eprintln!("Multiple links match '{}':", id);
            for link in &matches {
                eprintln!("  {} - {}", link.id, link.title);
            }
            bail!("Ambiguous ID. Please provide more digits.");
        }
    }
}

fn find<S: KeyValueStore>(store: &LinkStore<S>, id: i64) -> Result<&LinkRecord> {
    store
        .get(id)
        .ok_or_else(|| anyhow!("Link not found: {}", id))
}
