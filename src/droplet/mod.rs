//! The droplet being staged: the uploaded application, the sandbox the
//! runtime lives in, and the launch environment collected along the way.

pub mod environment;

pub use environment::{relative_to, EnvironmentVariables, JavaHome, JavaOpts};

use crate::fs::FileSystem;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const JAVA_OPTS: &str = "JAVA_OPTS";

/// The uploaded application. Its top-level entries are captured when it is
/// opened, so directories created later under the same root (the sandbox,
/// the JRE) are never treated as part of the application.
#[derive(Debug, Clone)]
pub struct Application {
    root: PathBuf,
    children: Vec<PathBuf>,
}

impl Application {
    pub fn open(fs: &dyn FileSystem, root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let children = fs
            .read_dir(&root)
            .context(format!("Failed to open application at {:?}", root))?
            .into_iter()
            .map(|entry| entry.path)
            .collect();

        Ok(Self { root, children })
    }

    /// Drops any top-level entry that is, contains, or lies inside `path`
    pub fn excluding(mut self, path: &Path) -> Self {
        self.children
            .retain(|child| !path.starts_with(child) && !child.starts_with(path));
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a file inside the application
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    pub fn children(&self) -> &[PathBuf] {
        &self.children
    }
}

pub struct Droplet {
    pub root: PathBuf,
    pub sandbox: PathBuf,
    pub application: Application,
    pub additional_libraries: Vec<PathBuf>,
    pub environment_variables: EnvironmentVariables,
    pub java_opts: JavaOpts,
    pub java_home: JavaHome,
}

impl Droplet {
    /// Opens the droplet rooted at `root`. `sandbox` and `java_home` are
    /// relative to the root and are excluded from the application.
    pub fn open(
        fs: &dyn FileSystem,
        root: impl Into<PathBuf>,
        sandbox: impl AsRef<Path>,
        java_home: impl AsRef<Path>,
    ) -> Result<Self> {
        let root = root.into();
        let sandbox = root.join(sandbox);
        let java_home = root.join(java_home);
        let application = Application::open(fs, &root)?
            .excluding(&sandbox)
            .excluding(&java_home);

        Ok(Self {
            root,
            sandbox,
            application,
            additional_libraries: Vec::new(),
            environment_variables: EnvironmentVariables::new(),
            java_opts: JavaOpts::new(),
            java_home: JavaHome::new(java_home),
        })
    }

    pub fn with_additional_libraries(mut self, libraries: Vec<PathBuf>) -> Self {
        self.additional_libraries = libraries;
        self
    }

    pub fn sandbox(&self) -> &Path {
        &self.sandbox
    }

    /// Environment assignments for the launch command. JVM options are
    /// appended to the `JAVA_OPTS` assignment after its forwarded value.
    pub fn launch_env_vars(&self) -> String {
        let mut rendered = Vec::new();
        let mut java_opts_rendered = false;

        for (key, value) in self.environment_variables.iter() {
            if key == JAVA_OPTS && !self.java_opts.is_empty() {
                let merged = if value.is_empty() {
                    self.java_opts.joined()
                } else {
                    format!("{} {}", value, self.java_opts.joined())
                };
                rendered.push(environment::assignment(key, &merged));
                java_opts_rendered = true;
            } else {
                rendered.push(environment::assignment(key, value));
            }
        }

        if !java_opts_rendered && !self.java_opts.is_empty() {
            rendered.push(environment::assignment(JAVA_OPTS, &self.java_opts.joined()));
        }

        rendered.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;

    fn droplet(fs: &MockFileSystem) -> Droplet {
        Droplet::open(
            fs,
            "/app",
            ".java-buildpack/jboss",
            ".java-buildpack/open_jdk_jre",
        )
        .unwrap()
    }

    #[test]
    fn test_application_excludes_buildpack_dirs() {
        let fs = MockFileSystem::with_root(PathBuf::from("/app"));
        fs.add_file("WEB-INF/web.xml", "<web-app/>");
        fs.add_file("index.html", "hi");
        fs.add_dir(".java-buildpack/jboss/bin");

        let droplet = droplet(&fs);

        assert_eq!(
            droplet.application.children(),
            &[PathBuf::from("/app/WEB-INF"), PathBuf::from("/app/index.html")]
        );
        assert_eq!(droplet.sandbox(), Path::new("/app/.java-buildpack/jboss"));
    }

    #[test]
    fn test_application_excludes_entries_inside_sandbox() {
        let fs = MockFileSystem::with_root(PathBuf::from("/app"));
        fs.add_file("WEB-INF/web.xml", "<web-app/>");
        fs.add_dir("standalone/deployments");
        fs.add_file("bin/standalone.sh", "#!/bin/sh");

        let application = Application::open(&fs, "/app")
            .unwrap()
            .excluding(Path::new("/app/."));

        assert!(application.children().is_empty());
    }

    #[test]
    fn test_application_open_missing_root() {
        let fs = MockFileSystem::new();
        assert!(Application::open(&fs, "/nope").is_err());
    }

    #[test]
    fn test_launch_env_vars_merges_java_opts() {
        let fs = MockFileSystem::with_root(PathBuf::from("/app"));
        let mut droplet = droplet(&fs);
        droplet
            .environment_variables
            .add_environment_variable("JAVA_OPTS", "$JAVA_OPTS");
        droplet
            .java_opts
            .add_system_property("java.net.preferIPv4Stack", true);

        assert_eq!(
            droplet.launch_env_vars(),
            "JAVA_OPTS=\"$JAVA_OPTS -Djava.net.preferIPv4Stack=true\""
        );
    }

    #[test]
    fn test_launch_env_vars_without_java_opts() {
        let fs = MockFileSystem::with_root(PathBuf::from("/app"));
        let mut droplet = droplet(&fs);
        droplet
            .environment_variables
            .add_environment_variable("JAVA_OPTS", "$JAVA_OPTS");

        assert_eq!(droplet.launch_env_vars(), "JAVA_OPTS=$JAVA_OPTS");
    }

    #[test]
    fn test_launch_env_vars_adds_missing_java_opts_var() {
        let fs = MockFileSystem::with_root(PathBuf::from("/app"));
        let mut droplet = droplet(&fs);
        droplet.java_opts.add_option("-Xss1m");

        assert_eq!(droplet.launch_env_vars(), "JAVA_OPTS=-Xss1m");
    }

    #[test]
    fn test_launch_env_vars_empty() {
        let fs = MockFileSystem::with_root(PathBuf::from("/app"));
        assert_eq!(droplet(&fs).launch_env_vars(), "");
    }
}
