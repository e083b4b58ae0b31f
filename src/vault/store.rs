//! High-level vault operations used by CLI commands.
//!
//! `VaultStore` wraps a `keepass::Database` plus the file path and the
//! master password so the rest of the application can work with simple
//! method calls like `store.entry("work")`. Every mutating method only
//! touches the in-memory model; callers must pair mutations with
//! `save()` or the change is lost when the handle drops.

use std::fmt;
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use keepass::{
    db::{Entry, Group, Node, Value},
    Database, DatabaseKey,
};
use zeroize::Zeroizing;

use crate::errors::{KeyLaunchError, Result};

/// Group name the KeePass ecosystem reserves for deleted items.
/// Never shown in listings and never a valid entry name.
const RECYCLE_BIN: &str = "Recycle Bin";

/// A decrypted snapshot of one launchable entry.
///
/// Fields that the entry does not carry are `None`; callers get a typed
/// `MissingField` error through the accessors instead of string-matching
/// a library failure.
pub struct VaultEntry {
    /// Entry title (equal to its group name).
    pub name: String,

    /// The URL or file path the launcher should open.
    pub url: Option<String>,

    /// The stored password (zeroized on drop).
    pub secret: Option<Zeroizing<String>>,

    /// Optional key-file path from the entry's custom `key` property.
    pub key_file: Option<String>,
}

impl VaultEntry {
    /// The target URL, or a `MissingField` error naming it.
    pub fn url(&self) -> Result<&str> {
        self.url
            .as_deref()
            .ok_or_else(|| KeyLaunchError::MissingField {
                entry: self.name.clone(),
                field: "target URL",
            })
    }

    /// The stored password, or a `MissingField` error naming it.
    pub fn secret(&self) -> Result<&str> {
        self.secret
            .as_ref()
            .map(|s| s.as_str())
            .ok_or_else(|| KeyLaunchError::MissingField {
                entry: self.name.clone(),
                field: "password",
            })
    }
}

// Never print the stored password, not even from dbg!/assert output.
impl fmt::Debug for VaultEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultEntry")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("key_file", &self.key_file)
            .finish()
    }
}

/// The main vault handle. Create one with `VaultStore::create` or
/// `VaultStore::open`, then use its methods to manage entries.
pub struct VaultStore {
    /// Path to the `.kdbx` file on disk.
    path: PathBuf,

    /// Decrypted in-memory database model.
    db: Database,

    /// The master password, kept only to re-key on `save` (zeroized on drop).
    password: Zeroizing<String>,
}

impl fmt::Debug for VaultStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultStore")
            .field("path", &self.path)
            .field("db", &"<database>")
            .field("password", &"<redacted>")
            .finish()
    }
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a brand-new empty vault file at `path`.
    ///
    /// Writes the vault, then reopens it once with the same password so
    /// a key that fails to round-trip is caught here and not on first
    /// use. Callers decide what to do about a pre-existing file.
    pub fn create(path: &Path, password: &str) -> Result<Self> {
        let store = VaultStore {
            path: path.to_path_buf(),
            db: Database::new(Default::default()),
            password: Zeroizing::new(password.to_string()),
        };
        store.save()?;

        Self::open(path, password)
    }

    /// Open an existing vault file.
    ///
    /// A missing file maps to `VaultNotFound`; any decrypt or integrity
    /// failure maps to `InvalidCredentials` — with KDBX a wrong master
    /// password is indistinguishable from a corrupted file.
    pub fn open(path: &Path, password: &str) -> Result<Self> {
        let mut file = File::open(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                KeyLaunchError::VaultNotFound(path.to_path_buf())
            } else {
                KeyLaunchError::Io(e)
            }
        })?;

        let key = DatabaseKey::new().with_password(password);
        let db = Database::open(&mut file, key).map_err(|_| KeyLaunchError::InvalidCredentials)?;

        Ok(VaultStore {
            path: path.to_path_buf(),
            db,
            password: Zeroizing::new(password.to_string()),
        })
    }

    /// Rewrite the whole vault file from the in-memory model.
    pub fn save(&self) -> Result<()> {
        let key = DatabaseKey::new().with_password(&self.password);
        let mut file = File::create(&self.path)?;
        self.db
            .save(&mut file, key)
            .map_err(|e| KeyLaunchError::VaultWrite(e.to_string()))
    }

    /// Path of the backing vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Display names of all registered databases, in the order the
    /// library returns the groups, excluding the reserved recycle group.
    pub fn database_names(&self) -> Vec<String> {
        self.groups()
            .filter(|g| g.name != RECYCLE_BIN)
            .map(|g| g.name.clone())
            .collect()
    }

    /// Whether an entry with this exact title exists.
    pub fn has_entry(&self, name: &str) -> bool {
        self.find_entry(name).is_some()
    }

    /// Whether the name is taken by an entry *or* by a namespace group.
    ///
    /// A group can outlive its entry (an interrupted replace, another
    /// KeePass tool); re-setup must treat that name as existing too.
    pub fn is_registered(&self, name: &str) -> bool {
        self.has_entry(name) || self.groups().any(|g| g.name == name)
    }

    /// Decrypted snapshot of the entry titled `name`.
    pub fn entry(&self, name: &str) -> Result<VaultEntry> {
        let entry = self
            .find_entry(name)
            .ok_or_else(|| KeyLaunchError::EntryNotFound(name.to_string()))?;

        Ok(VaultEntry {
            name: name.to_string(),
            url: entry
                .get_url()
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            secret: entry
                .get_password()
                .filter(|s| !s.is_empty())
                .map(|s| Zeroizing::new(s.to_string())),
            key_file: entry.get("key").filter(|s| !s.is_empty()).map(str::to_string),
        })
    }

    // ------------------------------------------------------------------
    // Mutations (in-memory only; pair with `save`)
    // ------------------------------------------------------------------

    /// Register a database: a group named `name` under the root holding
    /// a single entry with the same title, the target URL, and the
    /// password stored as a protected field.
    ///
    /// Callers remove any existing entry of the same name first; the
    /// vault holds at most one entry per name. A leftover same-named
    /// group is reused rather than duplicated.
    pub fn add_entry(&mut self, name: &str, url: &str, secret: &str) {
        let mut entry = Entry::new();
        entry
            .fields
            .insert("Title".to_string(), Value::Unprotected(name.to_string()));
        entry
            .fields
            .insert("UserName".to_string(), Value::Unprotected(name.to_string()));
        entry
            .fields
            .insert("URL".to_string(), Value::Unprotected(url.to_string()));
        entry.fields.insert(
            "Password".to_string(),
            Value::Protected(secret.as_bytes().into()),
        );

        if let Some(group) = self.find_group_mut(name) {
            group.children.push(Node::Entry(entry));
            return;
        }

        let mut group = Group::new(name);
        group.children.push(Node::Entry(entry));
        self.db.root.children.push(Node::Group(group));
    }

    /// Store the custom `key` property on the entry titled `name`.
    pub fn set_key_file(&mut self, name: &str, key_file: &str) -> Result<()> {
        let entry = self
            .find_entry_mut(name)
            .ok_or_else(|| KeyLaunchError::EntryNotFound(name.to_string()))?;

        entry
            .fields
            .insert("key".to_string(), Value::Unprotected(key_file.to_string()));
        Ok(())
    }

    /// Delete the entry titled `name` and its namespace group.
    pub fn remove_entry(&mut self, name: &str) -> Result<()> {
        let mut removed = false;

        // Drop the entry wherever it lives.
        for node in &mut self.db.root.children {
            if let Node::Group(group) = node {
                let before = group.children.len();
                group
                    .children
                    .retain(|n| !matches!(n, Node::Entry(e) if e.get_title() == Some(name)));
                removed |= group.children.len() != before;
            }
        }

        // Drop the now-empty namespace group.
        let before = self.db.root.children.len();
        self.db
            .root
            .children
            .retain(|n| !matches!(n, Node::Group(g) if g.name == name));
        removed |= self.db.root.children.len() != before;

        if removed {
            Ok(())
        } else {
            Err(KeyLaunchError::EntryNotFound(name.to_string()))
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn groups(&self) -> impl Iterator<Item = &Group> {
        self.db.root.children.iter().filter_map(|node| match node {
            Node::Group(group) => Some(group),
            _ => None,
        })
    }

    fn find_entry(&self, name: &str) -> Option<&Entry> {
        self.groups()
            .flat_map(|g| g.children.iter())
            .find_map(|node| match node {
                Node::Entry(entry) if entry.get_title() == Some(name) => Some(entry),
                _ => None,
            })
    }

    fn find_group_mut(&mut self, name: &str) -> Option<&mut Group> {
        self.db
            .root
            .children
            .iter_mut()
            .find_map(|node| match node {
                Node::Group(group) if group.name == name => Some(group),
                _ => None,
            })
    }

    fn find_entry_mut(&mut self, name: &str) -> Option<&mut Entry> {
        self.db
            .root
            .children
            .iter_mut()
            .filter_map(|node| match node {
                Node::Group(group) => Some(group),
                _ => None,
            })
            .flat_map(|g| g.children.iter_mut())
            .find_map(|node| match node {
                Node::Entry(entry) if entry.get_title() == Some(name) => Some(entry),
                _ => None,
            })
    }
}
