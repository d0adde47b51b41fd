#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use tempfile::TempDir;
use teamcal::db::initialize::open_db;
use teamcal::db::pool::DbPool;

pub fn tc() -> Command {
    cargo_bin_cmd!("teamcal")
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// A throwaway database; removed when dropped.
pub struct TestDb {
    pub dir: TempDir,
    pub path: String,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir
            .path()
            .join("teamcal.sqlite")
            .to_string_lossy()
            .to_string();
        Self { dir, path }
    }

    /// `teamcal --db <path> --test ...`
    pub fn cmd(&self) -> Command {
        let mut cmd = tc();
        cmd.args(["--db", &self.path, "--test"]);
        cmd
    }

    /// `teamcal --db <path> --test --user <user> ...`
    pub fn as_user(&self, user: &str) -> Command {
        let mut cmd = self.cmd();
        cmd.args(["--user", user]);
        cmd
    }

    pub fn out_file(&self, name: &str) -> String {
        self.dir.path().join(name).to_string_lossy().to_string()
    }

    pub fn pool(&self) -> DbPool {
        open_db(&self.path, 5_000).expect("open db")
    }
}

/// Initialized database with an admin `sarah` and a regular user `bob`.
pub fn init_team() -> TestDb {
    let db = TestDb::new();
    db.cmd().arg("init").assert().success();
    db.cmd()
        .args(["user", "add", "sarah", "--name", "Sarah"])
        .assert()
        .success();
    db.as_user("sarah")
        .args(["user", "add", "bob", "--name", "Bob"])
        .assert()
        .success();
    db
}
