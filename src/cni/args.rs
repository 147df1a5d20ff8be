use crate::err::PluginError;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Add,
    Del,
    Check,
    Version,
}

impl FromStr for Command {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADD" => Ok(Command::Add),
            "DEL" => Ok(Command::Del),
            "CHECK" => Ok(Command::Check),
            "VERSION" => Ok(Command::Version),
            other => Err(PluginError::UnknownCommand(other.to_string())),
        }
    }
}

/// Runtime parameters passed by the container runtime through `CNI_*`
/// environment variables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CmdArgs {
    pub container_id: String,
    /// Empty on `DEL` when the runtime has already released the namespace.
    pub netns: String,
    pub ifname: String,
    pub args: String,
    pub path: String,
}

impl CmdArgs {
    pub fn from_env() -> Result<(Command, Self), PluginError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`CmdArgs::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<(Command, Self), PluginError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let command: Command = lookup("CNI_COMMAND")
            .filter(|value| !value.is_empty())
            .ok_or(PluginError::MissingEnvironment("CNI_COMMAND"))?
            .parse()?;

        if command == Command::Version {
            return Ok((command, Self::default()));
        }

        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(PluginError::MissingEnvironment(name))
        };

        let netns = match command {
            Command::Del => lookup("CNI_NETNS").unwrap_or_default(),
            _ => required("CNI_NETNS")?,
        };

        Ok((
            command,
            Self {
                container_id: required("CNI_CONTAINERID")?,
                netns,
                ifname: required("CNI_IFNAME")?,
                args: lookup("CNI_ARGS").unwrap_or_default(),
                path: required("CNI_PATH")?,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    type Vars = HashMap<&'static str, &'static str>;

    fn lookup(vars: &Vars) -> impl Fn(&str) -> Option<String> + '_ {
        move |name| vars.get(name).map(|value| value.to_string())
    }

    fn add_env() -> Vars {
        vec![
            ("CNI_COMMAND", "ADD"),
            ("CNI_CONTAINERID", "c0ffee"),
            ("CNI_NETNS", "/var/run/netns/test"),
            ("CNI_IFNAME", "eth0"),
            ("CNI_PATH", "/opt/cni/bin"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn reads_add_arguments() {
        let vars = add_env();
        let (command, args) = CmdArgs::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(command, Command::Add);
        assert_eq!(args.container_id, "c0ffee");
        assert_eq!(args.netns, "/var/run/netns/test");
        assert_eq!(args.args, "");
    }

    #[test]
    fn version_needs_only_command() {
        let vars = vec![("CNI_COMMAND", "VERSION")].into_iter().collect();
        let (command, args) = CmdArgs::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(command, Command::Version);
        assert_eq!(args, CmdArgs::default());
    }

    #[test]
    fn del_tolerates_missing_netns() {
        let mut vars = add_env();
        vars.insert("CNI_COMMAND", "DEL");
        vars.remove("CNI_NETNS");
        let (command, args) = CmdArgs::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(command, Command::Del);
        assert!(args.netns.is_empty());
    }

    #[test]
    fn add_requires_netns() {
        let mut vars = add_env();
        vars.remove("CNI_NETNS");
        let err = CmdArgs::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, PluginError::MissingEnvironment("CNI_NETNS")));
        assert_eq!(err.code(), 4);
    }

    #[test]
    fn rejects_unknown_command() {
        let vars = vec![("CNI_COMMAND", "GET")].into_iter().collect();
        let err = CmdArgs::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, PluginError::UnknownCommand(ref c) if c == "GET"));
        assert_eq!(err.code(), 4);
    }

    #[test]
    fn missing_command() {
        let vars = HashMap::new();
        assert!(matches!(
            CmdArgs::from_lookup(lookup(&vars)),
            Err(PluginError::MissingEnvironment("CNI_COMMAND"))
        ));
    }
}
