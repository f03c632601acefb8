// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Filesystem-related utility functions.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File extensions (lowercase) of the audio files that have a supported tag format.
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["mp3", "flac"];

/// An iterator that recursively walks through a directory structure and yields a tuple `(path,
/// dirs, files)` for each directory it visits.
///
/// Directories are visited in lexicographical order of their paths.
///
/// This struct is created by [`walk_dir`]. See its documentation for more.
#[derive(Debug)]
pub struct DirWalk {
    /// Queued paths that will be visited next.
    queue: BinaryHeap<Reverse<PathBuf>>,
}

impl Iterator for DirWalk {
    type Item = io::Result<(PathBuf, Vec<PathBuf>, Vec<PathBuf>)>;

    fn next(&mut self) -> Option<Self::Item> {
        let queued_path = self.queue.pop();
        queued_path.map(move |Reverse(path)| {
            log::debug!("Queued path: {}", path.display());
            fs::read_dir(&path).and_then(move |entries| {
                let mut files = vec![];
                let mut dirs = vec![];
                for entry in entries {
                    let entry_path = entry?.path();

                    if entry_path.is_dir() {
                        dirs.push(entry_path);
                    } else {
                        files.push(entry_path);
                    }
                }

                dirs.sort_unstable();
                files.sort_unstable();

                for dir in dirs.clone() {
                    self.queue.push(Reverse(dir));
                }

                Ok((path, dirs, files))
            })
        })
    }
}

/// Creates an iterator that walks through a directory structure recursively and yields a tuple
/// consisting of the path of current directory and the files and directories in that directory.
pub fn walk_dir(path: PathBuf) -> DirWalk {
    let mut queue = BinaryHeap::new();
    queue.push(Reverse(path));
    DirWalk { queue }
}

/// Returns `true` if the file at the given path has an extension that indicates a supported tag
/// format.
pub fn is_supported_file(path: &Path) -> bool {
    path.extension()
        .map(OsStr::to_ascii_lowercase)
        .and_then(|extension| {
            extension
                .to_str()
                .map(|extension| SUPPORTED_EXTENSIONS.contains(&extension))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn test_is_supported_file() {
        assert!(is_supported_file(Path::new("01 - Allegro.mp3")));
        assert!(is_supported_file(Path::new("/music/02 - Adagio.FLAC")));
        assert!(!is_supported_file(Path::new("cover.jpg")));
        assert!(!is_supported_file(Path::new("README")));
    }

    #[test]
    fn test_walk_dir_order() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let root = tmp_dir.path();
        fs::create_dir_all(root.join("b")).unwrap();
        fs::create_dir_all(root.join("a/c")).unwrap();
        let _file = File::create(root.join("a/2.flac")).unwrap();
        let _file = File::create(root.join("a/1.mp3")).unwrap();

        let visited: Vec<_> = walk_dir(root.to_path_buf())
            .map(Result::unwrap)
            .collect();
        let paths: Vec<_> = visited.iter().map(|(path, _, _)| path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                root.to_path_buf(),
                root.join("a"),
                root.join("a/c"),
                root.join("b")
            ]
        );

        let (_, dirs, files) = &visited[1];
        assert_eq!(dirs, &vec![root.join("a/c")]);
        assert_eq!(files, &vec![root.join("a/1.mp3"), root.join("a/2.flac")]);
    }
}
