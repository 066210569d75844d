// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::path::PathBuf;
use std::process::Command;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "x", about = "Development tasks for the bloomset workspace")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Compile every workspace member.
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Run unit, integration and doc tests.
    Test {
        /// Only run tests whose name contains this string.
        filter: Option<String>,
    },
    /// Run clippy with warnings denied.
    Lint,
    /// Format the workspace, or check formatting with `--check`.
    Fmt {
        #[arg(long)]
        check: bool,
    },
}

impl Cmd {
    fn cargo_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        match self {
            Cmd::Build { release } => {
                args.extend(["build", "--workspace", "--all-targets"]);
                if *release {
                    args.push("--release");
                }
            }
            Cmd::Test { filter } => {
                args.extend(["test", "--workspace"]);
                args.extend(filter.as_deref());
            }
            Cmd::Lint => {
                args.extend(["clippy", "--workspace", "--all-targets"]);
                args.extend(["--", "-D", "warnings"]);
            }
            Cmd::Fmt { check } => {
                args.extend(["fmt", "--all"]);
                if *check {
                    args.extend(["--", "--check"]);
                }
            }
        }
        args.into_iter().map(String::from).collect()
    }
}

fn cargo() -> Result<PathBuf, String> {
    if let Some(cargo) = std::env::var_os("CARGO") {
        return Ok(PathBuf::from(cargo));
    }
    which::which("cargo").map_err(|err| format!("cannot find cargo: {err}"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let cargo = match cargo() {
        Ok(cargo) => cargo,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let args = cli.cmd.cargo_args();
    eprintln!("$ cargo {}", args.join(" "));
    match Command::new(cargo).args(&args).status() {
        Ok(status) if status.success() => ExitCode::SUCCESS,
        Ok(status) => {
            eprintln!("cargo exited with {status}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("failed to spawn cargo: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cargo_args() {
        let test = Cmd::Test {
            filter: Some("smoke".to_string()),
        };
        assert_eq!(test.cargo_args(), vec!["test", "--workspace", "smoke"]);

        let fmt = Cmd::Fmt { check: true };
        assert_eq!(fmt.cargo_args(), vec!["fmt", "--all", "--", "--check"]);

        let lint = Cmd::Lint.cargo_args();
        assert_eq!(lint[..3], ["clippy", "--workspace", "--all-targets"]);
        assert_eq!(lint[3..], ["--", "-D", "warnings"]);
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["x", "build", "--release"]).unwrap();
        assert!(matches!(cli.cmd, Cmd::Build { release: true }));
    }
}
