/// Pointwise pairing of a tuple of iterators into an iterator of tuples.
///
/// Yields `(a, b, ...)` element by element and stops at the shortest lane.
/// Lanes are pulled left to right, so put bounded lanes first to avoid
/// sampling the others once the pipeline ends.
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ZipLanes<T> {
    lanes: T,
}

/// Combine 2 to 6 iterators into one iterator of flat tuples.
pub fn zip_lanes<T>(lanes: T) -> ZipLanes<T>
where
    ZipLanes<T>: Iterator,
{
    ZipLanes { lanes }
}

macro_rules! impl_zip_lanes {
    ($($lane:ident),+) => {
        #[allow(non_snake_case)]
        impl<$($lane),+> Iterator for ZipLanes<($($lane,)+)>
        where
            $($lane: Iterator,)+
        {
            type Item = ($($lane::Item,)+);

            fn next(&mut self) -> Option<Self::Item> {
                let ($($lane,)+) = &mut self.lanes;
                Some(($($lane.next()?,)+))
            }
        }
    };
}

impl_zip_lanes!(A, B);
impl_zip_lanes!(A, B, C);
impl_zip_lanes!(A, B, C, D);
impl_zip_lanes!(A, B, C, D, E);
impl_zip_lanes!(A, B, C, D, E, F);
