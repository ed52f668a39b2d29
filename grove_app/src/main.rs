//! Headless authoring walkthrough
//!
//! Drives a full editing session without a window: place a few models,
//! duplicate and move them, adjust the environment, export the scene to
//! disk, and import it back. Useful as a smoke test of the editing core
//! and as a worked example of the collaborator traits.

use futures::future::BoxFuture;
use futures::FutureExt;
use scene_engine::assets::{AssetSource, EnvironmentTexture, MeshData, TemplatePart};
use scene_engine::prelude::*;
use std::sync::Arc;

/// Asset source that fabricates mesh data instead of reading files
///
/// Every model in the stock catalog resolves to a deterministic
/// procedural mesh; anything else is unknown, exactly as a disk-backed
/// source would report a missing file.
struct ProceduralSource {
    catalog: Vec<String>,
}

impl AssetSource for ProceduralSource {
    fn load_model(&self, name: &str) -> BoxFuture<'static, Result<Template, AssetError>> {
        let known = self.catalog.contains(&name.to_string());
        let name = name.to_string();
        async move {
            if !known {
                return Err(AssetError::UnknownTemplate(name));
            }
            // Seed sizes from the name so repeated runs look alike
            let seed = name.bytes().map(u32::from).sum::<u32>();
            let parts = (0..=(seed % 2) as usize)
                .map(|i| TemplatePart {
                    mesh: Arc::new(MeshData {
                        label: format!("{name}_{i}"),
                        vertex_count: 64 + seed % 512,
                        triangle_count: 32 + seed % 256,
                        bounding_radius: 1.0 + (seed % 40) as f32 / 10.0,
                    }),
                    materials: PartMaterials::Single(Material::default()),
                })
                .collect();
            Ok(Template { name, parts })
        }
        .boxed()
    }

    fn load_environment_texture(
        &self,
        file: &str,
    ) -> BoxFuture<'static, Result<EnvironmentTexture, AssetError>> {
        let file = file.to_string();
        async move {
            Ok(EnvironmentTexture {
                file,
                width: 2048,
                height: 1024,
            })
        }
        .boxed()
    }
}

/// Panel that mirrors selection changes into the log
struct LoggingPanel;

impl SelectionPanel for LoggingPanel {
    fn selection_changed(&mut self, info: Option<&SelectionInfo>) {
        match info {
            Some(info) => log::info!(
                "selected {:?} at ({}) rotation ({}) scale ({})",
                info.name,
                info.position,
                info.rotation,
                info.scale
            ),
            None => log::info!("selection cleared"),
        }
    }
}

fn main() {
    env_logger::init();

    let config = EditorConfig::default();
    let source = Arc::new(ProceduralSource {
        catalog: config.available_models.clone(),
    });
    let mut session = EditorSession::new(
        source,
        Box::new(HeadlessBackend::new()),
        Box::new(LoggingPanel),
        config,
    );

    futures::executor::block_on(async {
        let camera_position = Vec3::new(0.0, 5.0, 10.0);
        let camera_forward = Vec3::new(0.0, -0.3, -1.0);

        session
            .add_model("oak1", camera_position, camera_forward)
            .await
            .expect("oak1 is in the catalog");
        session.rename_selected("old oak");

        session
            .add_model("birch1", camera_position, camera_forward)
            .await
            .expect("birch1 is in the catalog");
        session
            .edit_selected(TransformField::Position, "3.5, 0, -8")
            .expect("hand-written position is well-formed");

        // A small copse from one birch
        session.duplicate_selected();
        session.duplicate_selected();

        session
            .set_skybox("NightSkyHDRI009_2K-TONEMAPPED.jpg")
            .await
            .expect("procedural skyboxes always load");
        session.set_ground("forest_floor", 100);
        session.set_sun_params(SunParams {
            intensity: 0.6,
            speed: 0.05,
            ..SunParams::default()
        });

        // Simulate a couple of seconds of orbit
        let mut light = session.tick(0.0);
        for _ in 0..120 {
            light = session.tick(1.0 / 60.0);
        }
        log::info!("sun now at {:?}", light.position);

        let document = session.export_document();
        let path = std::env::temp_dir().join(EXPORT_FILE_NAME);
        if let Err(err) = document.save_to_path(&path) {
            log::error!("export failed: {err}");
            return;
        }

        match SceneDocument::load_from_path(&path) {
            Ok(loaded) => {
                let summary = session.import_document(&loaded).await;
                log::info!(
                    "reimported {} instances ({} skipped), {} sub-parts live",
                    summary.placed,
                    summary.skipped,
                    session.store().part_count()
                );
            }
            Err(err) => log::error!("reimport failed: {err}"),
        }
    });
}
