#[macro_use]
mod cases;

test_case!(
    empty_input,
    input: "",
    listing: Ok(""),
);

test_case!(
    every_iconst,
    input: "02 03 04 05 06 07 08",
    listing: Ok(concat!(
        "   0: iconst_m1\n",
        "   1: iconst_0\n",
        "   2: iconst_1\n",
        "   3: iconst_2\n",
        "   4: iconst_3\n",
        "   5: iconst_4\n",
        "   6: iconst_5\n",
    )),
);

test_case!(
    bipush_is_signed,
    input: "10 80 10 7f 10 ff",
    listing: Ok("   0: bipush -128\n   2: bipush 127\n   4: bipush -1\n"),
);

test_case!(
    ldc_and_ldc_w,
    input: "12 07 13 01 00",
    listing: Ok("   0: ldc 7\n   2: ldc_w 256\n"),
);

test_case!(
    small_ldc_w_keeps_its_encoding,
    input: "13 00 09 03",
    listing: Ok("   0: ldc_w 9\n   3: iconst_0\n"),
);

test_case!(
    fstore_encodings,
    input: "45 38 82 38 02 c4 38 01 2c",
    listing: Ok(concat!(
        "   0: fstore_2\n",
        "   1: fstore 130\n",
        "   3: fstore 2\n",
        "   5: fstore 300\n",
    )),
);

test_case!(
    prefixed_and_comma_separated,
    input: "0x04, 0x43",
    listing: Ok("   0: iconst_1\n   1: fstore_0\n"),
);

test_case!(
    unknown_opcode,
    input: "04 60",
    listing: Err("unknown opcode 0x60 at offset 1"),
);

test_case!(
    wide_before_bipush,
    input: "c4 10 01",
    listing: Err("illegal wide prefix before opcode 0x10 at offset 1"),
);

test_case!(
    truncated_ldc_w,
    input: "13 01",
    listing: Err("unexpected end of bytecode at offset 1: needed 2 byte(s), 1 available"),
);

test_case!(
    bad_hex,
    input: "10 x5",
    listing: Err("invalid hex input: invalid hex digit 'x' at position 3"),
);
