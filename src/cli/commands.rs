use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Stages Java web applications onto a JBoss runtime
#[derive(Parser, Debug)]
#[command(
    name = "jboss-stage",
    about = "Stages Java web applications onto a JBoss runtime",
    version,
    author,
    long_about = "jboss-stage decides whether an application is a WAR or EAR that belongs on \
                  JBoss, copies it into the runtime's deployment directory with its \
                  configuration and drivers, and prints the command that starts the server."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,

    #[arg(
        short = 'c',
        long,
        global = true,
        value_name = "FILE",
        help = "YAML configuration file"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Check whether the application can run on JBoss",
        long_about = "Prints the container tag and exits 0 when the application is a WAR \
                      (without a main class) or an EAR. Exits 1 otherwise.\n\n\
                      Examples:\n  \
                      jboss-stage detect /tmp/app"
    )]
    Detect(DetectArgs),

    #[command(
        about = "Stage the application into the JBoss sandbox",
        long_about = "Installs the runtime, patches standalone.xml, installs a bundled MariaDB \
                      driver, copies the application and additional libraries into \
                      standalone/deployments and writes the .dodeploy marker.\n\n\
                      Examples:\n  \
                      jboss-stage compile /tmp/app\n  \
                      jboss-stage compile /tmp/app --distribution jboss-as-7.1.1.tar.gz\n  \
                      jboss-stage compile /tmp/app --library /tmp/libs/extra.jar"
    )]
    Compile(CompileArgs),

    #[command(
        about = "Print the command that starts JBoss",
        long_about = "Builds the launch command, including JAVA_OPTS, JAVA_HOME and the \
                      start script relative to the droplet root.\n\n\
                      Examples:\n  \
                      jboss-stage release /tmp/app\n  \
                      jboss-stage release /tmp/app --format json"
    )]
    Release(ReleaseArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DropletArgs {
    #[arg(value_name = "APP", help = "Droplet root containing the application")]
    pub application: PathBuf,

    #[arg(
        long,
        value_name = "DIR",
        help = "Sandbox directory, relative to the droplet root"
    )]
    pub sandbox: Option<PathBuf>,

    #[arg(
        long,
        value_name = "DIR",
        help = "JRE directory, relative to the droplet root"
    )]
    pub java_home: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[command(flatten)]
    pub droplet: DropletArgs,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct CompileArgs {
    #[command(flatten)]
    pub droplet: DropletArgs,

    #[arg(
        short = 'l',
        long = "library",
        value_name = "JAR",
        help = "Additional library to add to the deployment (repeatable)"
    )]
    pub libraries: Vec<PathBuf>,

    #[arg(
        short = 'd',
        long,
        value_name = "FILE",
        help = "Runtime distribution tarball (.tar.gz) to expand into the sandbox"
    )]
    pub distribution: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ReleaseArgs {
    #[command(flatten)]
    pub droplet: DropletArgs,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
