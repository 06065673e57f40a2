//! Static descriptor tables.
//!
//! Experimental engine parameters have no named enum variant of their own;
//! they are addressed through the `ZSTD_c_experimentalParamN` slots the
//! engine header maps them to.

use zstd_sys::ZSTD_cParameter::{self, *};
use zstd_sys::ZSTD_dParameter::{self, *};

use super::ParamKind;

pub(crate) struct ParamDescriptor<P: 'static> {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub kind: ParamKind,
    pub id: P,
}

const fn int<P>(name: &'static str, aliases: &'static [&'static str], id: P) -> ParamDescriptor<P> {
    ParamDescriptor { name, aliases, kind: ParamKind::Int, id }
}

const fn flag<P>(name: &'static str, aliases: &'static [&'static str], id: P) -> ParamDescriptor<P> {
    ParamDescriptor { name, aliases, kind: ParamKind::Bool, id }
}

pub(crate) static COMPRESSION_PARAMS: [ParamDescriptor<ZSTD_cParameter>; 37] = [
    int("compression_level", &["level"], ZSTD_c_compressionLevel),
    int("window_log", &[], ZSTD_c_windowLog),
    int("hash_log", &[], ZSTD_c_hashLog),
    int("chain_log", &[], ZSTD_c_chainLog),
    int("search_log", &[], ZSTD_c_searchLog),
    int("min_match", &[], ZSTD_c_minMatch),
    int("target_length", &[], ZSTD_c_targetLength),
    int("strategy", &[], ZSTD_c_strategy),
    int("target_cblock_size", &[], ZSTD_c_targetCBlockSize),
    // long distance matching
    flag("enable_long_distance_matching", &["long_distance_matching"], ZSTD_c_enableLongDistanceMatching),
    int("ldm_hash_log", &[], ZSTD_c_ldmHashLog),
    int("ldm_min_match", &[], ZSTD_c_ldmMinMatch),
    int("ldm_bucket_size_log", &[], ZSTD_c_ldmBucketSizeLog),
    int("ldm_hash_rate_log", &[], ZSTD_c_ldmHashRateLog),
    // frame
    flag("content_size_flag", &["content_size"], ZSTD_c_contentSizeFlag),
    flag("checksum_flag", &["checksum"], ZSTD_c_checksumFlag),
    flag("dict_id_flag", &["dict_id"], ZSTD_c_dictIDFlag),
    // multi-threading
    int("workers", &["nb_workers"], ZSTD_c_nbWorkers),
    int("job_size", &[], ZSTD_c_jobSize),
    int("overlap_log", &[], ZSTD_c_overlapLog),
    // experimental
    flag("rsyncable", &[], ZSTD_c_experimentalParam1),
    int("format", &[], ZSTD_c_experimentalParam2),
    flag("force_max_window", &[], ZSTD_c_experimentalParam3),
    int("force_attach_dict", &[], ZSTD_c_experimentalParam4),
    int("literal_compression_mode", &[], ZSTD_c_experimentalParam5),
    int("src_size_hint", &[], ZSTD_c_experimentalParam7),
    flag("enable_dedicated_dict_search", &[], ZSTD_c_experimentalParam8),
    flag("stable_in_buffer", &[], ZSTD_c_experimentalParam9),
    flag("stable_out_buffer", &[], ZSTD_c_experimentalParam10),
    flag("block_delimiters", &[], ZSTD_c_experimentalParam11),
    flag("validate_sequences", &[], ZSTD_c_experimentalParam12),
    int("use_row_match_finder", &[], ZSTD_c_experimentalParam14),
    flag("deterministic_ref_prefix", &[], ZSTD_c_experimentalParam15),
    int("prefetch_cdict_tables", &[], ZSTD_c_experimentalParam16),
    flag("enable_seq_producer_fallback", &[], ZSTD_c_experimentalParam17),
    int("max_block_size", &[], ZSTD_c_experimentalParam18),
    int("search_for_external_repcodes", &[], ZSTD_c_experimentalParam19),
];

pub(crate) static DECOMPRESSION_PARAMS: [ParamDescriptor<ZSTD_dParameter>; 1] = [
    int("window_log_max", &["max_window_log"], ZSTD_d_windowLogMax),
];
