// Atelier Sauvage - Build Task Runner
// Unified build system using cargo xtask pattern

use std::collections::BTreeSet;

use anyhow::{Context, Result, bail};
use xshell::{Shell, cmd};

fn main() -> Result<()> {
    let sh = Shell::new()?;
    let args: Vec<_> = std::env::args().skip(1).collect();

    match args.first().map(|s| s.as_str()) {
        Some("build") => {
            let release = args.contains(&"--release".to_string());
            build(&sh, release)
        }
        Some("test") => test(&sh),
        Some("format") => {
            let check = args.contains(&"--check".to_string());
            format(&sh, check)
        }
        Some("clippy") => clippy(&sh),
        Some("run") => run(&sh, &args[1..]),
        Some("clean") => clean(&sh),
        Some("check-dictionaries") => check_dictionaries(),
        Some("ci") => ci(&sh),
        Some("dist") => dist(&sh),
        _ => {
            print_help();
            Ok(())
        }
    }
}

fn print_help() {
    println!("Atelier Sauvage - Build Commands:");
    println!();
    println!("Usage: cargo xtask <COMMAND> [OPTIONS]");
    println!();
    println!("Commands:");
    println!("  build [--release]    Build front end and server");
    println!("  test                 Run all tests");
    println!("  format [--check]     Format code (check mode doesn't modify)");
    println!("  clippy               Run clippy checks");
    println!("  run [ARGS...]        Build and run the server");
    println!("  clean                Clean build artifacts");
    println!("  check-dictionaries   Verify fr/en dictionary bundles share their key set");
    println!("  ci                   Run all CI checks (format + clippy + dictionaries + build + test)");
    println!("  dist                 Create distribution package (tar.gz)");
    println!();
    println!("Examples:");
    println!("  cargo xtask build --release");
    println!("  cargo xtask check-dictionaries");
}

/// Build front end and server
fn build(sh: &Shell, release: bool) -> Result<()> {
    println!("🔨 Building Atelier Sauvage...");
    println!();

    println!("📦 [1/2] Building front end...");
    build_frontend(sh)?;
    println!("✅ Front end build complete");
    println!();

    println!("🦀 [2/2] Building server{}...", if release { " (release)" } else { "" });
    build_server(sh, release)?;
    println!("✅ Server build complete");
    println!();

    println!("🎉 Build complete!");
    Ok(())
}

/// Build front end using npm, output lands in server/web
fn build_frontend(sh: &Shell) -> Result<()> {
    let _dir = sh.push_dir(project_root().join("frontend"));

    cmd!(sh, "npm install")
        .run()
        .context("Failed to install front-end dependencies")?;

    cmd!(sh, "npm run build -- --outDir ../server/web --emptyOutDir")
        .run()
        .context("Failed to build front end")?;

    Ok(())
}

/// Build server using cargo
fn build_server(sh: &Shell, release: bool) -> Result<()> {
    let _dir = sh.push_dir(project_root().join("server"));

    if release {
        cmd!(sh, "cargo build --release")
            .run()
            .context("Failed to build server in release mode")?;
    } else {
        cmd!(sh, "cargo build").run().context("Failed to build server")?;
    }

    Ok(())
}

/// Run all tests
fn test(sh: &Shell) -> Result<()> {
    println!("🧪 Running tests...");
    println!();

    let _dir = sh.push_dir(project_root());

    cmd!(sh, "cargo test --workspace").run().context("Tests failed")?;

    println!();
    println!("✅ All tests passed!");

    Ok(())
}

/// Format code
fn format(sh: &Shell, check: bool) -> Result<()> {
    println!("🎨 Formatting Rust code...");

    let _dir = sh.push_dir(project_root());

    if check {
        cmd!(sh, "cargo fmt --all -- --check")
            .run()
            .context("Rust code is not formatted")?;
        println!("✅ Rust code is properly formatted");
    } else {
        cmd!(sh, "cargo fmt --all").run().context("Failed to format Rust code")?;
        println!("✅ Rust code formatted");
    }

    Ok(())
}

/// Run clippy checks
fn clippy(sh: &Shell) -> Result<()> {
    let _dir = sh.push_dir(project_root());

    cmd!(sh, "cargo clippy --all-targets -- --deny warnings --allow clippy::uninlined-format-args")
        .run()
        .context("Clippy checks failed")?;

    Ok(())
}

/// Build and run the server
fn run(sh: &Shell, args: &[String]) -> Result<()> {
    println!("🚀 Building and running Atelier Sauvage...");
    println!();

    build(sh, false)?;

    println!();
    println!("▶️  Starting server...");
    println!();

    let _dir = sh.push_dir(project_root().join("server"));

    let mut cmd = cmd!(sh, "cargo run --");
    for arg in args {
        cmd = cmd.arg(arg);
    }

    cmd.run().context("Failed to run server")?;

    Ok(())
}

/// Clean build artifacts
fn clean(sh: &Shell) -> Result<()> {
    println!("🧹 Cleaning build artifacts...");
    println!();

    let project = project_root();

    let _dir = sh.push_dir(&project);
    cmd!(sh, "cargo clean").run()?;

    let web_dist = project.join("server/web");
    let frontend_cache = project.join("frontend/node_modules/.cache");
    if web_dist.exists() {
        cmd!(sh, "rm -rf {web_dist}").run()?;
    }
    if frontend_cache.exists() {
        cmd!(sh, "rm -rf {frontend_cache}").run()?;
    }

    println!();
    println!("✅ Clean complete!");

    Ok(())
}

/// Verify every dictionary bundle translates the same key set.
///
/// A key missing from one bundle ships as a silent fallback to the
/// visitor, so CI gates on parity instead of trusting review to spot it.
fn check_dictionaries() -> Result<()> {
    println!("📖 Checking dictionary bundles...");

    let dir = project_root().join("server/dictionaries");
    let mut per_locale: Vec<(String, BTreeSet<String>)> = Vec::new();

    for entry in std::fs::read_dir(&dir).context("server/dictionaries missing")? {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let locale = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
            .to_string();
        let content = std::fs::read_to_string(&path)?;
        let bundle: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("{} is not valid JSON", path.display()))?;

        let mut keys = BTreeSet::new();
        collect_keys("", &bundle, &mut keys);
        println!("   {}: {} keys", locale, keys.len());
        per_locale.push((locale, keys));
    }

    if per_locale.len() < 2 {
        bail!("expected at least two dictionary bundles, found {}", per_locale.len());
    }

    let (reference_locale, reference_keys) = &per_locale[0];
    for (locale, keys) in &per_locale[1..] {
        let missing: Vec<_> = reference_keys.difference(keys).collect();
        let extra: Vec<_> = keys.difference(reference_keys).collect();
        if !missing.is_empty() || !extra.is_empty() {
            bail!(
                "dictionary {} diverges from {}: missing {:?}, extra {:?}",
                locale,
                reference_locale,
                missing,
                extra
            );
        }
    }

    println!("✅ Dictionary bundles are in sync");
    Ok(())
}

fn collect_keys(prefix: &str, value: &serde_json::Value, keys: &mut BTreeSet<String>) {
    match value.as_object() {
        Some(object) => {
            for (key, child) in object {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                collect_keys(&path, child, keys);
            }
        }
        None => {
            keys.insert(prefix.to_string());
        }
    }
}

/// Run all CI checks (format + clippy + dictionaries + build + test)
fn ci(sh: &Shell) -> Result<()> {
    println!("🔄 Running CI pipeline...");
    println!();

    println!("📝 [1/5] Checking code format...");
    format(sh, true)?;
    println!();

    println!("🔍 [2/5] Running clippy checks...");
    clippy(sh)?;
    println!("✅ Clippy checks passed");
    println!();

    println!("📖 [3/5] Checking dictionary bundles...");
    check_dictionaries()?;
    println!();

    println!("🔨 [4/5] Building project...");
    build(sh, true)?;
    println!();

    println!("🧪 [5/5] Running tests...");
    test(sh)?;
    println!();

    println!("🎉 CI pipeline completed successfully!");

    Ok(())
}

/// Create distribution package (tar.gz)
fn dist(sh: &Shell) -> Result<()> {
    println!("📦 Creating distribution package...");
    println!();

    build(sh, true)?;

    let project = project_root();
    let dist_dir = project.join("build/dist");

    cmd!(sh, "mkdir -p {dist_dir}/bin").run()?;
    cmd!(sh, "mkdir -p {dist_dir}/conf").run()?;
    cmd!(sh, "mkdir -p {dist_dir}/web").run()?;
    cmd!(sh, "mkdir -p {dist_dir}/logs").run()?;

    let binary_src = project.join("target/release/atelier-server");
    let binary_dst = dist_dir.join("bin/atelier-server");
    cmd!(sh, "cp {binary_src} {binary_dst}").run()?;

    let config_src = project.join("server/conf/config.toml");
    let config_dst = dist_dir.join("conf/config.toml");
    cmd!(sh, "cp {config_src} {config_dst}").run()?;

    let web_src = project.join("server/web");
    if web_src.exists() {
        cmd!(sh, "cp -r {web_src}/. {dist_dir}/web/").run()?;
    }

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let package_name = format!("atelier-server-{}.tar.gz", timestamp);

    println!("📋 Creating tarball: {}...", package_name);

    let _dir = sh.push_dir(&dist_dir);
    cmd!(sh, "tar czf {package_name} bin conf web logs")
        .run()
        .context("Failed to create tarball")?;

    println!();
    println!("✅ Distribution package created!");
    println!("   Location: {}", dist_dir.join(&package_name).display());

    Ok(())
}

/// Get project root directory
fn project_root() -> std::path::PathBuf {
    std::path::Path::new(&env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(1)
        .unwrap()
        .to_path_buf()
}
