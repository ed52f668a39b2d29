//! Memoizing, coalescing cache over an [`AssetSource`]

use super::{AssetError, AssetSource, EnvironmentTexture, Template};
use futures::future::{BoxFuture, FutureExt, Shared, TryFutureExt};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type SharedLoad<T> = Shared<BoxFuture<'static, Result<Arc<T>, AssetError>>>;

/// Cache of model-name and skybox-name lookups
///
/// Entries live for the process lifetime; the universe of named assets is
/// small and fixed, so there is no eviction. Concurrent requests for the
/// same uncached name coalesce onto a single in-flight load and every
/// caller awaits the same shared result. A failed load is dropped from
/// the cache so the triggering user action can simply be retried.
pub struct TemplateCache {
    source: Arc<dyn AssetSource + Send + Sync>,
    models: Mutex<HashMap<String, SharedLoad<Template>>>,
    textures: Mutex<HashMap<String, SharedLoad<EnvironmentTexture>>>,
}

impl TemplateCache {
    /// Create a cache backed by the given asset source
    pub fn new(source: Arc<dyn AssetSource + Send + Sync>) -> Self {
        Self {
            source,
            models: Mutex::new(HashMap::new()),
            textures: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve a model name to its template, loading on first use
    ///
    /// An empty name fails with [`AssetError::UnknownTemplate`] without
    /// consulting the source.
    pub async fn template(&self, name: &str) -> Result<Arc<Template>, AssetError> {
        if name.is_empty() {
            return Err(AssetError::UnknownTemplate(String::new()));
        }

        let load = {
            // The lock is released before awaiting; only the map access
            // is guarded.
            let mut models = self.models.lock().unwrap();
            match models.get(name) {
                Some(load) => load.clone(),
                None => {
                    log::debug!("loading model template {name:?}");
                    let load = self
                        .source
                        .load_model(name)
                        .map_ok(Arc::new)
                        .boxed()
                        .shared();
                    models.insert(name.to_string(), load.clone());
                    load
                }
            }
        };

        let result = load.await;
        if let Err(error) = &result {
            log::warn!("model template {name:?} failed to load: {error}");
            self.models.lock().unwrap().remove(name);
        }
        result
    }

    /// Resolve a skybox file name to its environment texture
    ///
    /// Same memoization and coalescing contract as [`Self::template`].
    pub async fn environment_texture(
        &self,
        file: &str,
    ) -> Result<Arc<EnvironmentTexture>, AssetError> {
        if file.is_empty() {
            return Err(AssetError::UnknownTemplate(String::new()));
        }

        let load = {
            let mut textures = self.textures.lock().unwrap();
            match textures.get(file) {
                Some(load) => load.clone(),
                None => {
                    log::debug!("loading environment texture {file:?}");
                    let load = self
                        .source
                        .load_environment_texture(file)
                        .map_ok(Arc::new)
                        .boxed()
                        .shared();
                    textures.insert(file.to_string(), load.clone());
                    load
                }
            }
        };

        let result = load.await;
        if let Err(error) = &result {
            log::warn!("environment texture {file:?} failed to load: {error}");
            self.textures.lock().unwrap().remove(file);
        }
        result
    }

    /// Number of resident model templates
    pub fn model_count(&self) -> usize {
        self.models.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Material, PartMaterials};
    use crate::assets::{MeshData, TemplatePart};
    use futures::executor::block_on;
    use futures::future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::task::{Context, Poll};

    /// Future that reports `Pending` once before resolving, so tests can
    /// observe two callers sharing a genuinely in-flight load.
    struct YieldOnce<T> {
        value: Option<T>,
        yielded: bool,
    }

    impl<T: Unpin> std::future::Future for YieldOnce<T> {
        type Output = T;

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> {
            if self.yielded {
                Poll::Ready(self.value.take().expect("polled after completion"))
            } else {
                self.yielded = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    struct CountingSource {
        loads: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new(fail: bool) -> Self {
            Self {
                loads: AtomicUsize::new(0),
                fail,
            }
        }

        fn load_count(&self) -> usize {
            self.loads.load(Ordering::SeqCst)
        }
    }

    fn stub_template(name: &str) -> Template {
        Template {
            name: name.to_string(),
            parts: vec![TemplatePart {
                mesh: Arc::new(MeshData {
                    label: format!("{name}_mesh"),
                    vertex_count: 8,
                    triangle_count: 12,
                    bounding_radius: 1.0,
                }),
                materials: PartMaterials::Single(Material::default()),
            }],
        }
    }

    impl AssetSource for CountingSource {
        fn load_model(&self, name: &str) -> BoxFuture<'static, Result<Template, AssetError>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            let result = if self.fail {
                Err(AssetError::LoadFailed {
                    name: name.to_string(),
                    reason: "stub failure".to_string(),
                })
            } else {
                Ok(stub_template(name))
            };
            YieldOnce {
                value: Some(result),
                yielded: false,
            }
            .boxed()
        }

        fn load_environment_texture(
            &self,
            file: &str,
        ) -> BoxFuture<'static, Result<EnvironmentTexture, AssetError>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            future::ready(Ok(EnvironmentTexture {
                file: file.to_string(),
                width: 2048,
                height: 1024,
            }))
            .boxed()
        }
    }

    #[test]
    fn test_repeated_lookups_load_once() {
        let source = Arc::new(CountingSource::new(false));
        let cache = TemplateCache::new(source.clone());

        let first = block_on(cache.template("oak1")).unwrap();
        let second = block_on(cache.template("oak1")).unwrap();

        assert_eq!(source.load_count(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_concurrent_lookups_coalesce() {
        let source = Arc::new(CountingSource::new(false));
        let cache = TemplateCache::new(source.clone());

        let (a, b) = block_on(future::join(cache.template("oak1"), cache.template("oak1")));

        assert_eq!(source.load_count(), 1);
        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
    }

    #[test]
    fn test_distinct_names_load_separately() {
        let source = Arc::new(CountingSource::new(false));
        let cache = TemplateCache::new(source.clone());

        block_on(cache.template("oak1")).unwrap();
        block_on(cache.template("birch1")).unwrap();

        assert_eq!(source.load_count(), 2);
        assert_eq!(cache.model_count(), 2);
    }

    #[test]
    fn test_empty_name_rejected_without_load() {
        let source = Arc::new(CountingSource::new(false));
        let cache = TemplateCache::new(source.clone());

        let result = block_on(cache.template(""));

        assert_eq!(result, Err(AssetError::UnknownTemplate(String::new())));
        assert_eq!(source.load_count(), 0);
    }

    #[test]
    fn test_failed_load_is_retryable() {
        let source = Arc::new(CountingSource::new(true));
        let cache = TemplateCache::new(source.clone());

        assert!(block_on(cache.template("oak1")).is_err());
        assert_eq!(cache.model_count(), 0, "failure must not be pinned");

        // The retry consults the source again instead of replaying the error
        assert!(block_on(cache.template("oak1")).is_err());
        assert_eq!(source.load_count(), 2);
    }

    #[test]
    fn test_environment_texture_cached() {
        let source = Arc::new(CountingSource::new(false));
        let cache = TemplateCache::new(source.clone());

        let first = block_on(cache.environment_texture("sky.jpg")).unwrap();
        let second = block_on(cache.environment_texture("sky.jpg")).unwrap();

        assert_eq!(source.load_count(), 1);
        assert_eq!(first, second);
    }
}
