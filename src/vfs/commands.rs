//! Built-in shell commands run by [`Storage::execute`]
//!
//! Commands are stateless: relative paths always resolve against `/`.
//! Storage failures are returned as errors; usage problems and unknown
//! commands are reported through the output text and a non-zero exit code.

use std::fmt::Write as _;
use std::io::{Read, Write};

use super::{OpenOptions, Storage, Vfs, VfsError};
use crate::logic::formatting::format_size_plain;
use crate::logic::path;

const HELP: &str = "\
Available commands:
  help                 show this help
  ls [path]            list a directory
  cat <path>           print a file
  stat <path>          show file metadata
  mkdir <path>         create a directory
  touch <path>         create an empty file
  rm [-r] <path>       remove a file or directory
  echo <words..>       print words
  write <path> <words..>  replace a file with words
  mounts               list mount points
  pwd                  print the working directory
";

/// Exit code for an unknown command
pub const EXIT_NOT_FOUND: i32 = 127;
/// Exit code for bad arguments
pub const EXIT_USAGE: i32 = 2;

pub fn execute(vfs: &Vfs, args: &[String], out: &mut String) -> Result<i32, VfsError> {
    let Some((name, rest)) = args.split_first() else {
        return Ok(0);
    };

    tracing::debug!(command = %name, args = ?rest, "executing command");

    match name.as_str() {
        "help" => {
            out.push_str(HELP);
            Ok(0)
        }
        "ls" => ls(vfs, rest, out),
        "cat" => cat(vfs, rest, out),
        "stat" => stat(vfs, rest, out),
        "mkdir" => mkdir(vfs, rest, out),
        "touch" => touch(vfs, rest, out),
        "rm" => rm(vfs, rest, out),
        "echo" => {
            out.push_str(&rest.join(" "));
            out.push('\n');
            Ok(0)
        }
        "write" => write(vfs, rest, out),
        "mounts" => mounts(vfs, out),
        "pwd" => {
            out.push_str("/\n");
            Ok(0)
        }
        other => {
            let _ = writeln!(out, "{}: command not found", other);
            Ok(EXIT_NOT_FOUND)
        }
    }
}

fn resolve(arg: &str) -> String {
    path::join("/", arg)
}

fn usage(out: &mut String, text: &str) -> Result<i32, VfsError> {
    let _ = writeln!(out, "usage: {}", text);
    Ok(EXIT_USAGE)
}

fn ls(vfs: &Vfs, args: &[String], out: &mut String) -> Result<i32, VfsError> {
    let dir = args.first().map(|a| resolve(a)).unwrap_or_else(|| "/".to_string());
    for meta in vfs.list_directory(&dir)? {
        let suffix = if meta.is_dir() { "/" } else { "" };
        let _ = writeln!(
            out,
            "{} {:>9} {} {}{}",
            meta.mode,
            format_size_plain(meta.size),
            meta.modified.format("%Y-%m-%d %H:%M"),
            meta.key,
            suffix
        );
    }
    Ok(0)
}

fn cat(vfs: &Vfs, args: &[String], out: &mut String) -> Result<i32, VfsError> {
    if args.is_empty() {
        return usage(out, "cat <path>");
    }
    for arg in args {
        let mut reader = vfs.open_for_read(&resolve(arg))?;
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        out.push_str(&String::from_utf8_lossy(&data));
    }
    Ok(0)
}

fn stat(vfs: &Vfs, args: &[String], out: &mut String) -> Result<i32, VfsError> {
    let Some(arg) = args.first() else {
        return usage(out, "stat <path>");
    };
    let target = resolve(arg);
    let meta = vfs.stat(&target)?;
    let _ = writeln!(out, "  File: {}", target);
    let _ = writeln!(out, "  Size: {}", meta.size);
    let _ = writeln!(out, "  Mode: {}", meta.mode);
    let _ = writeln!(out, "  Type: {}", meta.content_type);
    let _ = writeln!(out, "Modify: {}", meta.modified.format("%Y-%m-%d %H:%M:%S UTC"));
    Ok(0)
}

fn mkdir(vfs: &Vfs, args: &[String], out: &mut String) -> Result<i32, VfsError> {
    if args.is_empty() {
        return usage(out, "mkdir <path>");
    }
    for arg in args {
        vfs.create_directory(&resolve(arg))?;
    }
    Ok(0)
}

fn touch(vfs: &Vfs, args: &[String], out: &mut String) -> Result<i32, VfsError> {
    if args.is_empty() {
        return usage(out, "touch <path>");
    }
    let options = OpenOptions {
        create: true,
        ..OpenOptions::default()
    };
    for arg in args {
        vfs.open_for_write(&resolve(arg), options)?.close()?;
    }
    Ok(0)
}

fn rm(vfs: &Vfs, args: &[String], out: &mut String) -> Result<i32, VfsError> {
    let recursive = args.iter().any(|a| a == "-r" || a == "-rf");
    let targets: Vec<&String> = args.iter().filter(|a| !a.starts_with('-')).collect();
    if targets.is_empty() {
        return usage(out, "rm [-r] <path>");
    }

    for arg in targets {
        let target = resolve(arg);
        if vfs.stat(&target)?.is_dir() {
            vfs.remove_directory(&target, recursive)?;
        } else {
            vfs.remove_file(&target)?;
        }
    }
    Ok(0)
}

fn write(vfs: &Vfs, args: &[String], out: &mut String) -> Result<i32, VfsError> {
    let Some((arg, words)) = args.split_first() else {
        return usage(out, "write <path> <words..>");
    };
    let mut handle = vfs.open_for_write(&resolve(arg), OpenOptions::create_truncate())?;
    let mut text = words.join(" ");
    text.push('\n');
    handle.write_all(text.as_bytes())?;
    handle.close()?;
    Ok(0)
}

fn mounts(vfs: &Vfs, out: &mut String) -> Result<i32, VfsError> {
    for (point, kind) in vfs.mounts()? {
        let _ = writeln!(out, "{:<16} {}", point, kind);
    }
    Ok(0)
}
