pub(crate) mod load;
pub(crate) mod row;
pub(crate) mod save;
