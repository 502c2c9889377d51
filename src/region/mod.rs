/// Partition header, host sector 0
/// magic, geometry shifts and the disc presence table
pub(crate) mod head;

/// Disc directory entries, starting from host sector 1
/// one [`geometry::Geometry::disc_info_size`][link] sized entry per slot
///
/// [link]: crate::geometry::Geometry
pub(crate) mod disc_info;
