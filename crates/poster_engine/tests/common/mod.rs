#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use poster_engine::{Vcs, VcsError};

pub const LATEST_LINK: &str = "https://mrmcmuffinz.github.io/posts/kvm_libvirt_setup_guide/";

pub const RSS_XML: &str = r#"<?xml version="1.0" encoding="utf-8" standalone="yes"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
  <channel>
    <title>Posts on Home</title>
    <link>https://mrmcmuffinz.github.io/posts/</link>
    <description>Recent content in Posts on Home</description>
    <generator>Hugo</generator>
    <language>en-us</language>
    <atom:link href="https://mrmcmuffinz.github.io/posts/index.xml" rel="self" type="application/rss+xml" />
    <item>
      <title>KVM + Libvirt Setup Guide</title>
      <link>https://mrmcmuffinz.github.io/posts/kvm_libvirt_setup_guide/</link>
      <pubDate>Sun, 01 Dec 2024 00:00:00 +0000</pubDate>
      <guid>https://mrmcmuffinz.github.io/posts/kvm_libvirt_setup_guide/</guid>
      <description>&lt;p&gt;A comprehensive guide to setting up KVM with Libvirt&lt;/p&gt;</description>
    </item>
    <item>
      <title>Older Post</title>
      <link>https://mrmcmuffinz.github.io/posts/older/</link>
      <pubDate>Sun, 01 Nov 2024 00:00:00 +0000</pubDate>
      <guid>https://mrmcmuffinz.github.io/posts/older/</guid>
      <description>Older content</description>
    </item>
  </channel>
</rss>"#;

pub const EMPTY_RSS_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<rss version="2.0">
  <channel>
    <title>Nothing yet</title>
    <link>https://x/</link>
    <description>Empty</description>
  </channel>
</rss>"#;

/// Records every git call; `status` answers with a scripted value.
#[derive(Default)]
pub struct RecordingVcs {
    pub status_output: String,
    pub fail_push: bool,
    pub calls: RefCell<Vec<String>>,
}

impl RecordingVcs {
    pub fn with_changes() -> Self {
        Self {
            status_output: " M .github/.lastPost.txt\n".to_string(),
            ..Self::default()
        }
    }

    pub fn clean() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl Vcs for RecordingVcs {
    fn configure_identity(&self, email: &str, user: &str) -> Result<(), VcsError> {
        self.record(format!("config {email} {user}"));
        Ok(())
    }

    fn status(&self, path: &Path) -> Result<String, VcsError> {
        self.record(format!("status {}", file_name(path)));
        Ok(self.status_output.clone())
    }

    fn add(&self, path: &Path) -> Result<(), VcsError> {
        self.record(format!("add {}", file_name(path)));
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<(), VcsError> {
        self.record(format!("commit {message}"));
        Ok(())
    }

    fn push(&self) -> Result<(), VcsError> {
        self.record("push".to_string());
        if self.fail_push {
            return Err(VcsError::Command {
                args: "push".into(),
                code: Some(1),
                stderr: "rejected".into(),
            });
        }
        Ok(())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn marker_in(dir: &Path) -> PathBuf {
    dir.join(".github").join(".lastPost.txt")
}
