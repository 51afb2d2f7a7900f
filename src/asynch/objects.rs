//! Object description files and object instances on the module
//!
//! Both checks are idempotent: nothing is written when the file or the
//! instance is already present.
use core::fmt::Write;

use embassy_sync::blocking_mutex::raw::RawMutex;
use heapless::String;

use super::{channel::CommandChannel, control::Control};
use crate::{
    command::{
        file_system::{ListFiles, PrepareObjectWrite, OBJECT_DATA_MAX_LEN, OBJECT_DIRECTORY},
        lwm2m::{types::TELIT_INSTANCE, CreateInstance, ReadResource},
        MAX_FILE_PATH_LEN,
    },
    error::Error,
};

/// An LwM2M object description, stored as `/XML/<file_name>`.
#[derive(Debug, Clone, Copy)]
pub struct ObjectDefinition<'a> {
    pub object_id: u16,
    pub file_name: &'a str,
    /// Object description XML, uploaded verbatim
    pub content: &'a [u8],
}

impl ObjectDefinition<'_> {
    pub fn path(&self) -> Result<String<MAX_FILE_PATH_LEN>, Error> {
        let mut path = String::new();
        write!(path, "{}/{}", OBJECT_DIRECTORY, self.file_name).map_err(|_| Error::Overflow)?;
        Ok(path)
    }
}

impl<M: RawMutex, C: CommandChannel> Control<'_, M, C> {
    /// Whether any entry of the object directory listing contains `name`.
    ///
    /// This is a substring test: `object_3303.xml` is reported present when
    /// only `object_3303.xml.bak` exists. A failed listing reads as absent.
    pub async fn file_exists(&self, name: &str) -> bool {
        let listing = match self
            .at
            .query(&ListFiles {
                directory: OBJECT_DIRECTORY,
            })
            .await
        {
            Ok(listing) => listing,
            Err(e) => {
                warn!("Failed to list {}: {:?}", OBJECT_DIRECTORY, e);
                return false;
            }
        };

        // Bound first, the entry iterator borrows `listing`
        let found = listing.entries().any(|entry| entry.contains(name));
        found
    }

    /// Upload `definition` unless the object directory already lists it.
    ///
    /// Content larger than [`OBJECT_DATA_MAX_LEN`] is rejected before the
    /// write is announced. Fails without retry if the write is refused or the
    /// channel accepts fewer bytes than the content length.
    pub async fn ensure_object_definition(
        &self,
        definition: &ObjectDefinition<'_>,
    ) -> Result<(), Error> {
        if self.file_exists(definition.file_name).await {
            debug!("Object definition {} present", definition.file_name);
            return Ok(());
        }

        if definition.content.len() > OBJECT_DATA_MAX_LEN {
            error!(
                "{} is {} bytes, uploads are limited to {}",
                definition.file_name,
                definition.content.len(),
                OBJECT_DATA_MAX_LEN
            );
            return Err(Error::Overflow);
        }

        let path = definition.path()?;
        info!("Uploading {} ({} bytes)", path.as_str(), definition.content.len());

        let mut tx = self.at.lock().await;
        tx.send(&PrepareObjectWrite {
            path: &path,
            size: definition.content.len(),
        })
        .await?;

        let accepted = tx.write_raw(definition.content).await?;
        if accepted < definition.content.len() {
            return Err(Error::PartialWrite {
                accepted,
                expected: definition.content.len(),
            });
        }

        tx.finish_raw().await?;
        Ok(())
    }

    /// Create `/<object_id>/<instance_id>` unless it can already be read.
    pub async fn ensure_object_instance(&self, object_id: u16, instance_id: u16) -> Result<(), Error> {
        let mut tx = self.at.lock().await;

        if tx
            .send(&ReadResource {
                object_id,
                instance_id,
            })
            .await
            .is_ok()
        {
            debug!("Instance /{}/{} present", object_id, instance_id);
            return Ok(());
        }

        // Probe failure is the expected outcome for a missing instance
        tx.clear().await;
        tx.send(&CreateInstance {
            telit_instance: TELIT_INSTANCE,
            object_id,
            instance_id,
        })
        .await?;

        info!("Created instance /{}/{}", object_id, instance_id);
        Ok(())
    }

    /// Make the object usable: its description is on the module and
    /// `instance_id` exists.
    pub async fn enable_object(
        &self,
        definition: &ObjectDefinition<'_>,
        instance_id: u16,
    ) -> Result<(), Error> {
        self.ensure_object_definition(definition).await?;
        self.ensure_object_instance(definition.object_id, instance_id)
            .await
    }
}
