//! Media page: media files grouped by an optional folder selection.

use schema::{Folder, FolderDraft, MediaFile, MediaFileDraft};

use crate::{ApiClient, ClientError, CollectionCache};

/// Media view: media files under an optional folder filter, plus the folder
/// list itself. Both collections are cached and refetched after mutations.
#[derive(Debug)]
pub struct MediaPage {
    client: ApiClient,
    folder_id: Option<i64>,
    files: CollectionCache<MediaFile>,
    folders: CollectionCache<Folder>,
}

impl MediaPage {
    /// Creates the page against an API client, showing all files.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            folder_id: None,
            files: CollectionCache::new(),
            folders: CollectionCache::new(),
        }
    }

    /// Currently selected folder filter.
    pub fn selected_folder(&self) -> Option<i64> {
        self.folder_id
    }

    /// Changes the folder filter. Switching selection drops the cached file
    /// list since it was fetched for a different filter.
    pub fn select_folder(&mut self, folder_id: Option<i64>) {
        if self.folder_id != folder_id {
            self.folder_id = folder_id;
            self.files.invalidate();
        }
    }

    /// Returns the media files under the current filter, fetching when the
    /// cache is stale.
    pub async fn files(&mut self) -> Result<&[MediaFile], ClientError> {
        if self.files.is_stale() {
            let fetched = self.client.list_media_files(self.folder_id).await?;
            self.files.fill(fetched);
        }
        Ok(self.files.records())
    }

    /// Returns the folder list, fetching when the cache is stale.
    pub async fn folders(&mut self) -> Result<&[Folder], ClientError> {
        if self.folders.is_stale() {
            let fetched = self.client.list_folders().await?;
            self.folders.fill(fetched);
        }
        Ok(self.folders.records())
    }

    /// Registers a media file entry and invalidates the cached file list.
    pub async fn add_file(&mut self, draft: MediaFileDraft) -> Result<MediaFile, ClientError> {
        let file = self.client.create_media_file(&draft).await?;
        self.files.invalidate();
        Ok(file)
    }

    /// Deletes a media file entry and invalidates the cached file list.
    pub async fn remove_file(&mut self, id: i64) -> Result<(), ClientError> {
        self.client.delete_media_file(id).await?;
        self.files.invalidate();
        Ok(())
    }

    /// Creates a folder and invalidates the cached folder list.
    pub async fn add_folder(&mut self, draft: FolderDraft) -> Result<Folder, ClientError> {
        let folder = self.client.create_folder(&draft).await?;
        self.folders.invalidate();
        Ok(folder)
    }

    /// Deletes a folder and invalidates both caches: files referencing the
    /// folder survive on the server but the filtered view may change.
    pub async fn remove_folder(&mut self, id: i64) -> Result<(), ClientError> {
        self.client.delete_folder(id).await?;
        self.folders.invalidate();
        self.files.invalidate();
        Ok(())
    }
}
