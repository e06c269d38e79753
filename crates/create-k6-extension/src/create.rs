//! The creation pipeline
//!
//! Runs the ordered step list, each announced with a spinner and finished
//! with a status line. A step's captured command output is shown when the
//! step fails, or unconditionally in debug mode. The first failure aborts
//! the pipeline; nothing is retried and nothing is rolled back.

use std::future::Future;

use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};
use console::style;
use serde_json::{Map, Value};
use tempfile::TempDir;

use k6_scaffold::{exec, git, template, Error, Kind, Options};

use crate::output;

/// Create the extension project described by `opts`
pub async fn create(opts: &Options) -> Result<()> {
    let mut creator = Creator::new(opts)?;

    println!();
    output::header("Creating extension");

    run_step("Download template", opts.debug, creator.download_template()).await?;
    run_step("Expand template", opts.debug, creator.expand_template()).await?;

    if !opts.no_git_init {
        run_step(
            "Create git repository",
            opts.debug,
            creator.create_git_repository(),
        )
        .await?;
    }

    run_step("Generate sources", opts.debug, creator.generate_sources()).await?;

    if !opts.no_git_init {
        run_step(
            "Commit git repository",
            opts.debug,
            creator.commit_git_repository(),
        )
        .await?;
    }

    if !opts.installed && !opts.no_install {
        run_step("Install xk6", opts.debug, creator.install_xk6()).await?;
    }

    epilogue(opts);

    Ok(())
}

/// Announce a step, await it, and report its outcome.
///
/// Captured output is printed when the step failed or when debug mode is
/// enabled.
async fn run_step<F>(label: &str, debug: bool, step: F) -> Result<()>
where
    F: Future<Output = k6_scaffold::Result<String>>,
{
    let spinner = output::spinner(label);
    let result = step.await;
    spinner.finish_and_clear();

    match result {
        Ok(captured) => {
            output::success(label);

            if debug && !captured.is_empty() {
                output::diagnostic(&captured);
            }

            Ok(())
        }
        Err(err) => {
            output::failure(label);

            if let Error::CommandFailed {
                output: captured, ..
            } = &err
            {
                if !captured.is_empty() {
                    output::diagnostic(captured);
                }
            }

            Err(err.into())
        }
    }
}

/// Shared state of the pipeline steps
struct Creator<'a> {
    opts: &'a Options,
    data: Map<String, Value>,
    kind: Kind,
    /// Downloaded template source. Held as a TempDir so the temporary tree
    /// is removed on every exit path.
    src: Option<TempDir>,
}

impl<'a> Creator<'a> {
    fn new(opts: &'a Options) -> Result<Self> {
        Ok(Self {
            opts,
            data: opts.to_map()?,
            kind: opts.kind.unwrap_or(Kind::ScriptExtension),
            src: None,
        })
    }

    fn target_dir(&self) -> &Utf8Path {
        Utf8Path::new(&self.opts.dir)
    }

    /// Fetch a shallow copy of the kind-specific template repository into a
    /// temporary directory, stripped of its version-control metadata
    async fn download_template(&mut self) -> k6_scaffold::Result<String> {
        let suffix = self.kind.template_suffix();

        let tmp = tempfile::Builder::new()
            .prefix(&format!("template-{suffix}-"))
            .tempdir()?;
        let dest = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf())
            .map_err(|path| Error::invalid_path(path.to_string_lossy()))?;

        let url = format!("https://github.com/szkiba/xk6-template-{suffix}.git");
        let out = git::shallow_copy(&url, &dest).await?;

        self.src = Some(tmp);

        Ok(out)
    }

    /// Expand the downloaded template into the target directory
    async fn expand_template(&mut self) -> k6_scaffold::Result<String> {
        // Ownership of the TempDir moves into this step so the temporary
        // source tree is removed whether the expansion succeeds or fails.
        let tmp = self
            .src
            .take()
            .ok_or_else(|| Error::Io(std::io::Error::other("template has not been downloaded")))?;
        let src = Utf8Path::from_path(tmp.path())
            .ok_or_else(|| Error::invalid_path(tmp.path().to_string_lossy()))?;

        // The template references its own module path in import statements,
        // so discover it for the literal replacement pass.
        let src_module = exec::stdout(Some(src), "go", &["list", "-m"]).await?;
        let src_module = src_module.lines().next().unwrap_or_default().to_string();

        template::expand_tree(
            src,
            self.target_dir(),
            &self.data,
            &src_module,
            &self.opts.go_module,
        )?;

        Ok(String::new())
    }

    /// Initialize the git repository and register the origin remote
    async fn create_git_repository(&self) -> k6_scaffold::Result<String> {
        let mut out = git::init_repository(self.target_dir()).await?;

        if !self.opts.no_git_origin {
            out.push_str(&git::add_origin(self.target_dir(), &self.opts.git_origin).await?);
        }

        Ok(out)
    }

    /// Run the code generators of the new extension
    async fn generate_sources(&self) -> k6_scaffold::Result<String> {
        exec::run(Some(self.target_dir()), "go", &["generate", "./..."]).await
    }

    /// Stage and commit the generated files
    async fn commit_git_repository(&self) -> k6_scaffold::Result<String> {
        git::commit_all(self.target_dir(), "Initial commit").await
    }

    /// Install the xk6 extension development tool
    async fn install_xk6(&self) -> k6_scaffold::Result<String> {
        exec::run(None, "go", &["install", "go.k6.io/xk6/cmd/xk6@latest"]).await
    }
}

/// Success message with next steps
fn epilogue(opts: &Options) {
    println!();
    println!(
        "{}",
        style("Congratulations, the extension is ready!").green()
    );
    println!(
        "You can find the initial version of your new extension in:\n  {}",
        style(&opts.dir).yellow()
    );
    println!(
        "For more information on extension development, visit:\n  {}",
        style("https://grafana.com/docs/k6/latest/extensions/create/").cyan()
    );

    if opts.kind.unwrap_or(Kind::ScriptExtension) != Kind::ScriptExtension {
        return;
    }

    println!(
        "Use the following commands to build k6 with the {} extension:\n  {}\n  {}",
        style(&opts.name).yellow(),
        style(format!("cd {}", opts.dir)).yellow(),
        style(format!("xk6 build --with {}=.", opts.go_module)).yellow(),
    );
    println!(
        "You can test the extension with the following command:\n  {}",
        style("./k6 run test.js").yellow()
    );
    println!(
        "The TypeScript definition of the extension API can be found in:\n  {}",
        style("index.d.ts").yellow()
    );
    println!(
        "The source code and README.md can be regenerated with the following command:\n  {}",
        style("go generate").yellow()
    );
    println!(
        "See the documentation for more information:\n  {}",
        style("https://github.com/szkiba/create-k6-extension/").cyan()
    );
}
