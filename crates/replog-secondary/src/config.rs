use replog_core::Mode;

#[derive(clap::Parser, Debug)]
#[clap(author, version, about = "Secondary node of a replicated append-only log")]
pub struct Args {
    /// Declared process role. This binary only ever runs as `secondary`; any
    /// other value is a startup-fatal misconfiguration, checked in `main`.
    #[clap(long, env = "APP_MODE", value_enum, default_value_t = Mode::Secondary)]
    pub mode: Mode,

    /// Port the secondary HTTP server binds to.
    #[clap(long, env = "SECONDARY_SERVER_PORT", default_value = "8080")]
    pub port: u16,
}
