use crate::sql::CommandKind;

/// One line of the `.commands` reference.
#[derive(Debug, Clone, Copy)]
pub struct CommandInfo {
    pub kind: CommandKind,
    pub example: &'static str,
    pub description: &'static str,
}

pub const SUPPORTED_COMMANDS: [CommandInfo; 11] = [
    CommandInfo {
        kind: CommandKind::CreateDatabase,
        example: "CREATE DATABASE my_db;",
        description: "Creates a new database",
    },
    CommandInfo {
        kind: CommandKind::Use,
        example: "USE my_db;",
        description: "Switches to specified database",
    },
    CommandInfo {
        kind: CommandKind::CreateTable,
        example: "CREATE TABLE users (name, email, age);",
        description: "Creates a new table with specified columns",
    },
    CommandInfo {
        kind: CommandKind::Insert,
        example: "INSERT INTO users (name, email) VALUES ('John', 'john@example.com');",
        description: "Inserts new records into a table",
    },
    CommandInfo {
        kind: CommandKind::Select,
        example: "SELECT * FROM users;",
        description: "Retrieves data from a table",
    },
    CommandInfo {
        kind: CommandKind::Update,
        example: "UPDATE users SET name = 'Jane' WHERE email = 'john@example.com';",
        description: "Modifies existing records",
    },
    CommandInfo {
        kind: CommandKind::Delete,
        example: "DELETE FROM users WHERE name = 'John';",
        description: "Removes records from a table",
    },
    CommandInfo {
        kind: CommandKind::ShowDatabases,
        example: "SHOW DATABASES;",
        description: "Lists all databases",
    },
    CommandInfo {
        kind: CommandKind::ShowTables,
        example: "SHOW TABLES;",
        description: "Lists all tables in current database",
    },
    CommandInfo {
        kind: CommandKind::DropDatabase,
        example: "DROP DATABASE my_db;",
        description: "Deletes a database",
    },
    CommandInfo {
        kind: CommandKind::DropTable,
        example: "DROP TABLE users;",
        description: "Deletes a table",
    },
];
