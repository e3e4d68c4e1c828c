//! Per-test forum databases on an embedded PostgreSQL cluster.
//!
//! Databases are created with the `postgres` client so no Diesel transaction
//! wraps `CREATE DATABASE`. The schema itself is applied by the caller through
//! the production migration runner.

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use uuid::Uuid;

use super::format_postgres_error;
use super::pg_embed::test_cluster;

/// A freshly created, empty database and the cluster hosting it.
pub struct ForumDatabase {
    url: String,
    _cluster: TestCluster,
}

impl ForumDatabase {
    /// Connection URL for Diesel and `postgres` clients.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Run raw SQL, for arranging states the API cannot reach.
    pub fn execute(&self, sql: &str) -> Result<(), String> {
        let mut client =
            Client::connect(&self.url, NoTls).map_err(|err| format_postgres_error(&err))?;
        client
            .batch_execute(sql)
            .map_err(|err| format_postgres_error(&err))
    }
}

/// Start a cluster and create a uniquely named database on it.
pub fn provision_forum_database() -> Result<ForumDatabase, String> {
    let cluster = test_cluster()?;
    let connection = cluster.connection();
    let name = format!("forum_test_{}", Uuid::new_v4().simple());

    let mut admin = Client::connect(&connection.database_url("postgres"), NoTls)
        .map_err(|err| format_postgres_error(&err))?;
    admin
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(|err| format_postgres_error(&err))?;

    let url = connection.database_url(&name);
    Ok(ForumDatabase {
        url,
        _cluster: cluster,
    })
}
