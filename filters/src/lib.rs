mod outlier_removal;

pub use self::outlier_removal::StatOutlierRemoval;
