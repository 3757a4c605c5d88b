mod proj;

pub(crate) use proj::Reprojection;
