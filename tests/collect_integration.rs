use std::path::PathBuf;

use mocx::{Collection, Resolver, Vault, collect_notes};

fn note(vault_root: &std::path::Path, name: &str, body: &str) -> anyhow::Result<PathBuf> {
    let path = vault_root.join(name);
    std::fs::write(&path, body)?;
    Ok(path)
}

fn depth_of(collection: &Collection, vault_root: &std::path::Path, name: &str) -> Option<u32> {
    let suffix = std::path::Path::new(name);
    collection
        .notes
        .iter()
        .find(|(p, _)| p.ends_with(suffix) && p.starts_with(vault_root))
        .map(|(_, d)| *d)
}

#[test]
fn depths_are_shortest_paths_capped_at_max_depth() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let vault_root = std::fs::canonicalize(temp.path())?;

    // Root links B before A; B reaches A one hop deeper. A must still be
    // expanded from its shallower visit so C lands at depth 2.
    let root = note(&vault_root, "Root.md", "[[B]]\n[[A]]\n")?;
    note(&vault_root, "A.md", "[[C]]\n")?;
    note(&vault_root, "B.md", "[[A]]\n")?;
    note(&vault_root, "C.md", "leaf\n")?;

    let vault = Vault::open(&vault_root)?;
    let resolver = Resolver::new(&vault);
    let mut collection = Collection::default();
    collect_notes(&resolver, &mut collection, &root, 0, 2);

    assert_eq!(depth_of(&collection, &vault_root, "Root.md"), Some(0));
    assert_eq!(depth_of(&collection, &vault_root, "B.md"), Some(1));
    assert_eq!(depth_of(&collection, &vault_root, "A.md"), Some(1));
    assert_eq!(depth_of(&collection, &vault_root, "C.md"), Some(2));
    assert_eq!(collection.notes.len(), 4);
    Ok(())
}

#[test]
fn zero_depth_collects_only_the_root() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let vault_root = std::fs::canonicalize(temp.path())?;

    let root = note(&vault_root, "Root.md", "[[Linked]]\n")?;
    note(&vault_root, "Linked.md", "exists but unreachable\n")?;

    let vault = Vault::open(&vault_root)?;
    let resolver = Resolver::new(&vault);
    let mut collection = Collection::default();
    collect_notes(&resolver, &mut collection, &root, 0, 0);

    assert_eq!(collection.notes.len(), 1);
    assert_eq!(depth_of(&collection, &vault_root, "Root.md"), Some(0));
    assert_eq!(depth_of(&collection, &vault_root, "Linked.md"), None);
    assert!(collection.attachments.is_empty());
    Ok(())
}

#[test]
fn cycles_terminate() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let vault_root = std::fs::canonicalize(temp.path())?;

    let root = note(&vault_root, "Ping.md", "[[Pong]]\n")?;
    note(&vault_root, "Pong.md", "[[Ping]]\n")?;

    let vault = Vault::open(&vault_root)?;
    let resolver = Resolver::new(&vault);
    let mut collection = Collection::default();
    collect_notes(&resolver, &mut collection, &root, 0, 10);

    assert_eq!(collection.notes.len(), 2);
    assert_eq!(depth_of(&collection, &vault_root, "Ping.md"), Some(0));
    assert_eq!(depth_of(&collection, &vault_root, "Pong.md"), Some(1));
    Ok(())
}

#[test]
fn attachments_are_recorded_while_traversing() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let vault_root = std::fs::canonicalize(temp.path())?;
    std::fs::create_dir_all(vault_root.join("assets"))?;
    std::fs::write(vault_root.join("assets/photo.jpg"), [0u8; 8])?;

    let root = note(
        &vault_root,
        "Root.md",
        "![[photo.jpg]]\n![[ghost.png]]\n[[Next]]\n",
    )?;
    note(&vault_root, "Next.md", "end\n")?;

    let vault = Vault::open(&vault_root)?;
    let resolver = Resolver::new(&vault);
    let mut collection = Collection::default();
    collect_notes(&resolver, &mut collection, &root, 0, 2);

    assert_eq!(collection.attachments.len(), 1);
    let found = collection.attachments.iter().next().expect("one attachment");
    assert!(found.ends_with("assets/photo.jpg"));
    Ok(())
}

#[test]
fn unreadable_branch_stays_collected() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let vault_root = std::fs::canonicalize(temp.path())?;

    let root = note(&vault_root, "Root.md", "[[Gone]]\n")?;
    note(&vault_root, "Gone.md", "[[Unseen]]\n")?;
    note(&vault_root, "Unseen.md", "never reached\n")?;

    let vault = Vault::open(&vault_root)?;
    let resolver = Resolver::new(&vault);

    // Resolve first so the index knows Gone.md, then remove the file to
    // make the read fail mid-traversal.
    let resolved = resolver.resolve_note("Gone").expect("indexed");
    std::fs::remove_file(&resolved)?;

    let mut collection = Collection::default();
    collect_notes(&resolver, &mut collection, &root, 0, 3);

    assert_eq!(depth_of(&collection, &vault_root, "Gone.md"), Some(1));
    assert_eq!(depth_of(&collection, &vault_root, "Unseen.md"), None);
    Ok(())
}
