use sled::Db;

pub(crate) struct SledDb {
    db: Db,
}

impl SledDb {
    pub fn new(path: &str) -> Result<Self, sled::Error> {
        Ok(Self {
            db: sled::open(path)?,
        })
    }

    pub fn insert_bytes(&self, key: &str, value: &[u8]) -> Result<(), sled::Error> {
        self.db.insert(key.as_bytes(), value)?;
        self.db.flush()?;
        Ok(())
    }

    pub fn get_bytes(&self, key: &str) -> Option<Vec<u8>> {
        match self.db.get(key) {
            Ok(Some(value)) => Some(value.to_vec()),
            _ => None,
        }
    }

    pub fn remove(&self, key: &str) -> Result<(), sled::Error> {
        self.db.remove(key)?;
        self.db.flush()?;
        Ok(())
    }
}
