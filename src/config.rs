use std::path::PathBuf;

use crate::error::Error;

pub const USAGE: &str = "usage: cdg [play] [--scale N] [--transparent] <file.cdg>\n       cdg dump <file.cdg>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Show the stream in a window at the packet rate
    Play,
    /// List every decoded packet
    Dump,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub path: PathBuf,
    /// Integer window scale over the 300x216 screen
    pub scale: u32,
    pub transparency: bool,
}

impl Config {
    /// Parses the arguments following the program name.
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self, Error> {
        let mut args = args.into_iter().peekable();
        let mode = match args.peek().map(String::as_str) {
            Some("dump") => {
                args.next();
                Mode::Dump
            }
            Some("play") => {
                args.next();
                Mode::Play
            }
            _ => Mode::Play,
        };
        let mut scale = 2;
        let mut transparency = false;
        let mut path = None;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--scale" => {
                    let value = args.next().ok_or_else(|| usage("--scale needs a value"))?;
                    scale = match value.parse::<u32>() {
                        Ok(n) if n > 0 => n,
                        _ => return Err(usage(&format!("bad scale: {}", value))),
                    };
                }
                "--transparent" => transparency = true,
                flag if flag.starts_with("--") => {
                    return Err(usage(&format!("unknown option: {}", flag)));
                }
                _ if path.is_some() => return Err(usage("more than one file given")),
                _ => path = Some(PathBuf::from(&arg)),
            }
        }
        let path = path.ok_or_else(|| usage("no CD+G file given"))?;
        Ok(Config {
            mode,
            path,
            scale,
            transparency,
        })
    }
}

fn usage(problem: &str) -> Error {
    Error::Usage(format!("{}\n{}", problem, USAGE))
}
