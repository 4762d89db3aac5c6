use super::Producer;
use crate::graph::{Rule, SynthesisSession, Target};

/// Bitmap source extensions, highest priority first.
pub const RASTER_EXTENSIONS: [&str; 9] = ["png", "jpg", "jpeg", "gif", "tif", "tiff", "bmp", "ppm", "pnm"];

/// Converts a bitmap into an EPS wrapper.
pub struct RasterProducer {
    extension: &'static str,
}

impl RasterProducer {
    pub fn new(extension: &'static str) -> Self {
        Self { extension }
    }
}

impl Producer for RasterProducer {
    fn name(&self) -> &'static str {
        "raster"
    }

    fn source(&self, target: &Target, session: &SynthesisSession) -> Option<String> {
        let source = target.sibling(self.extension);
        session.is_available(&source).then_some(source)
    }

    fn produce(&self, target: &Target, source: &str, session: &mut SynthesisSession) {
        let convert = session.config().tools.convert.clone();
        session.emit_rule(
            Rule::new(&target.name)
                .with_prerequisites([source])
                .with_command(format!("{} {} eps2:{}", convert, source, target.name)),
        );
        session.add_clean(&target.name);
    }
}
