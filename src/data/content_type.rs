//! Object-type tags and the per-kind lookup tables that drive selection,
//! manipulation capabilities and content-node variants.

/// Object kind of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    None,
    System,
    LightSource,
    Construct,
    Depot,
    DockingRing,
    JumpGate,
    JumpHole,
    Planet,
    Satellite,
    Ship,
    Station,
    Sun,
    TradeLane,
    WeaponsPlatform,
    ModelPreview,
    ZoneSphere,
    ZoneSphereExclusion,
    ZoneVignette,
    ZoneEllipsoid,
    ZoneEllipsoidExclusion,
    ZoneCylinder,
    ZoneCylinderExclusion,
    ZoneRing,
    ZoneBox,
    ZoneBoxExclusion,
    ZonePath,
    ZonePathTrade,
    ZonePathTradeLane,
}

/// Which content-node variant represents a kind in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    System,
    Object,
    Zone,
    LightSource,
}

/// Placeholder shape drawn when no real model is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Box,
    Sphere,
    Cylinder,
}

impl ContentType {
    /// Selection priority used to break hit-test ties.
    ///
    /// Solid objects beat path zones, which beat every other zone.
    pub fn selection_priority(self) -> i32 {
        match self {
            ContentType::LightSource
            | ContentType::Construct
            | ContentType::Depot
            | ContentType::DockingRing
            | ContentType::JumpGate
            | ContentType::JumpHole
            | ContentType::Planet
            | ContentType::Satellite
            | ContentType::Ship
            | ContentType::Station
            | ContentType::Sun
            | ContentType::TradeLane
            | ContentType::WeaponsPlatform => 2,
            ContentType::ZonePath | ContentType::ZonePathTrade | ContentType::ZonePathTradeLane => 1,
            _ => 0,
        }
    }

    /// Number of manipulator handles that are legal for this kind.
    pub fn axis_count(self) -> usize {
        match self {
            ContentType::ZoneSphere | ContentType::ZoneSphereExclusion | ContentType::ZoneVignette => 1,
            // rings get a third axis once they have a real ring mesh
            ContentType::ZonePath
            | ContentType::ZonePathTrade
            | ContentType::ZoneRing
            | ContentType::System => 2,
            ContentType::ZoneEllipsoid
            | ContentType::ZoneEllipsoidExclusion
            | ContentType::ZoneCylinder
            | ContentType::ZoneCylinderExclusion
            | ContentType::ZoneBox
            | ContentType::ZoneBoxExclusion
            | ContentType::ZonePathTradeLane => 3,
            _ => 0,
        }
    }

    /// Content-node variant for this kind, `None` for the invalid kind.
    pub fn content_kind(self) -> Option<ContentKind> {
        match self {
            ContentType::None => None,
            ContentType::System => Some(ContentKind::System),
            ContentType::LightSource => Some(ContentKind::LightSource),
            ContentType::Construct
            | ContentType::Depot
            | ContentType::DockingRing
            | ContentType::JumpGate
            | ContentType::JumpHole
            | ContentType::Planet
            | ContentType::Satellite
            | ContentType::Ship
            | ContentType::Station
            | ContentType::Sun
            | ContentType::TradeLane
            | ContentType::WeaponsPlatform
            | ContentType::ModelPreview => Some(ContentKind::Object),
            _ => Some(ContentKind::Zone),
        }
    }

    /// Whether the kind is backed by a model file rather than a shape.
    pub fn is_real_model(self) -> bool {
        matches!(self.content_kind(), Some(ContentKind::Object))
    }

    pub fn is_zone(self) -> bool {
        matches!(self.content_kind(), Some(ContentKind::Zone))
    }

    /// Emissive content is drawn in the first render layer.
    pub fn is_emissive(self) -> bool {
        self.is_zone() || matches!(self, ContentType::Sun | ContentType::LightSource)
    }

    /// Placeholder shape for the kind.
    pub fn shape(self) -> Shape {
        match self {
            ContentType::ZoneBox | ContentType::ZoneBoxExclusion => Shape::Box,
            ContentType::ZoneCylinder
            | ContentType::ZoneCylinderExclusion
            | ContentType::ZoneRing
            | ContentType::ZonePath
            | ContentType::ZonePathTrade
            | ContentType::ZonePathTradeLane
            | ContentType::TradeLane => Shape::Cylinder,
            ContentType::System
            | ContentType::LightSource
            | ContentType::Planet
            | ContentType::Sun
            | ContentType::ZoneSphere
            | ContentType::ZoneSphereExclusion
            | ContentType::ZoneVignette
            | ContentType::ZoneEllipsoid
            | ContentType::ZoneEllipsoidExclusion => Shape::Sphere,
            _ => Shape::Box,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priorities() {
        assert_eq!(ContentType::Station.selection_priority(), 2);
        assert_eq!(ContentType::ZonePathTrade.selection_priority(), 1);
        assert_eq!(ContentType::ZoneBox.selection_priority(), 0);
        assert_eq!(ContentType::System.selection_priority(), 0);
    }

    #[test]
    fn test_axis_counts() {
        assert_eq!(ContentType::ZoneSphere.axis_count(), 1);
        assert_eq!(ContentType::ZoneRing.axis_count(), 2);
        assert_eq!(ContentType::System.axis_count(), 2);
        assert_eq!(ContentType::ZoneCylinder.axis_count(), 3);
        assert_eq!(ContentType::Planet.axis_count(), 0);
    }

    #[test]
    fn test_content_kinds() {
        assert_eq!(ContentType::None.content_kind(), None);
        assert_eq!(ContentType::System.content_kind(), Some(ContentKind::System));
        assert_eq!(ContentType::JumpGate.content_kind(), Some(ContentKind::Object));
        assert_eq!(ContentType::ZoneVignette.content_kind(), Some(ContentKind::Zone));
        assert!(ContentType::Ship.is_real_model());
        assert!(!ContentType::ZoneBox.is_real_model());
        assert!(ContentType::ZoneBox.is_emissive());
        assert!(!ContentType::Planet.is_emissive());
    }
}
